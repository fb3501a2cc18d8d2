//! REST API handlers for catalog pages
//!
//! A catalog page is identified by a `viewId`. Filter edits are applied to
//! that page's query state and, when they change the query, the search runs
//! before the handler answers. Search failures are reported in the `error`
//! field of the returned page state rather than as an HTTP error.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::ProductCategory;
use super::query::{CatalogQuery, CatalogSnapshot, FilterChange, IssuedQuery};
use super::session::CatalogSession;
use crate::error::AppError;
use crate::state::SharedState;

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/catalog/query", post(query_catalog))
        .route("/catalog/next", post(next_page))
        .route("/catalog/previous", post(previous_page))
        .route("/catalog/retry", post(retry))
}

/// Body of `POST /catalog/query`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQueryInput {
    pub view_id: Option<String>,
    pub search: Option<String>,
    /// Category wire id; an empty string or `ALL` clears the filter.
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub page: Option<u32>,
}

/// Body of the navigation endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogViewInput {
    pub view_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogViewResponse {
    pub view_id: String,
    #[serde(flatten)]
    pub state: CatalogSnapshot,
}

/// Endpoint: POST /catalog/query
async fn query_catalog(
    State(state): State<SharedState>,
    Json(payload): Json<CatalogQueryInput>,
) -> Result<Json<CatalogViewResponse>, AppError> {
    let view_id = payload
        .view_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
    let change = filter_change(&view_id, payload)?;

    let (session, created) = state.catalog_view(&view_id);
    let issued = session
        .update(|query| match query.change(change) {
            None if created => Some(query.refresh()),
            issued => issued,
        })
        .await;

    Ok(Json(respond(view_id, &session, issued).await))
}

/// Endpoint: POST /catalog/next
async fn next_page(
    State(state): State<SharedState>,
    Json(payload): Json<CatalogViewInput>,
) -> Result<Json<CatalogViewResponse>, AppError> {
    navigate(&state, payload.view_id, CatalogQuery::next_page).await
}

/// Endpoint: POST /catalog/previous
async fn previous_page(
    State(state): State<SharedState>,
    Json(payload): Json<CatalogViewInput>,
) -> Result<Json<CatalogViewResponse>, AppError> {
    navigate(&state, payload.view_id, CatalogQuery::previous_page).await
}

/// Endpoint: POST /catalog/retry
/// Re-runs the last query of the page exactly as it was sent.
async fn retry(
    State(state): State<SharedState>,
    Json(payload): Json<CatalogViewInput>,
) -> Result<Json<CatalogViewResponse>, AppError> {
    navigate(&state, payload.view_id, |query| Some(query.retry())).await
}

async fn navigate(
    state: &SharedState,
    view_id: String,
    step: impl FnOnce(&mut CatalogQuery) -> Option<IssuedQuery>,
) -> Result<Json<CatalogViewResponse>, AppError> {
    let session = state
        .catalog_views
        .get(&view_id)
        .map(|entry| entry.value().clone())
        .ok_or_else(|| AppError::NotFound(format!("catalog view {}", view_id)))?;

    let issued = session.update(step).await;
    Ok(Json(respond(view_id, &session, issued).await))
}

async fn respond(
    view_id: String,
    session: &CatalogSession,
    issued: Option<IssuedQuery>,
) -> CatalogViewResponse {
    let state = match issued {
        Some(issued) => session.fetch(issued).await,
        None => session.snapshot().await,
    };
    CatalogViewResponse { view_id, state }
}

fn filter_change(view_id: &str, payload: CatalogQueryInput) -> Result<FilterChange, AppError> {
    let category = payload
        .category_id
        .as_deref()
        .map(parse_category)
        .transpose()?;

    let (min_price, max_price) = (payload.min_price, payload.max_price);
    let negative = [min_price, max_price].iter().flatten().any(|bound| *bound < 0.0);
    let inverted = matches!((min_price, max_price), (Some(min), Some(max)) if min > max);
    if negative || inverted {
        return Err(AppError::BadRequest(format!(
            "invalid price range: {:?} to {:?}",
            min_price, max_price
        )));
    }

    tracing::debug!(view_id, ?category, ?min_price, ?max_price, "catalog filters received");
    Ok(FilterChange {
        search: payload.search,
        category,
        min_price,
        max_price,
        page: payload.page,
    })
}

fn parse_category(raw: &str) -> Result<Option<ProductCategory>, AppError> {
    match raw.trim() {
        "" | "ALL" => Ok(None),
        "INVERTER" => Ok(Some(ProductCategory::Inverter)),
        "BATTERY" => Ok(Some(ProductCategory::Battery)),
        "SOLAR_PANEL" => Ok(Some(ProductCategory::SolarPanel)),
        "FULL_SYSTEM" => Ok(Some(ProductCategory::FullSystem)),
        other => Err(AppError::BadRequest(format!("unknown category: {}", other))),
    }
}
