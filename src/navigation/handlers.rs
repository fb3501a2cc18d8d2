//! Dashboard navigation endpoint
//!
//! Pages report the current path on every route change and get back the tab
//! to highlight.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tabs::{ActiveTabRouter, DashboardTab};
use crate::error::AppError;
use crate::state::SharedState;

/// Creates routes for navigation operations
pub fn routes() -> Router<SharedState> {
    Router::new().route("/navigation/sync", post(sync_path))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPathInput {
    pub session_id: Option<String>,
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPathResponse {
    pub session_id: String,
    pub active_tab: DashboardTab,
    /// False when the path matched no known tab and the previous one was kept.
    pub matched: bool,
}

/// Endpoint: POST /navigation/sync
async fn sync_path(
    State(state): State<SharedState>,
    Json(payload): Json<SyncPathInput>,
) -> Result<Json<SyncPathResponse>, AppError> {
    if !payload.path.starts_with('/') {
        return Err(AppError::BadRequest(format!(
            "path must be absolute: {}",
            payload.path
        )));
    }

    let session_id = payload
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    let mut router = state
        .tab_routers
        .entry(session_id.clone())
        .or_insert_with(ActiveTabRouter::default);
    let matched = router.sync(&payload.path).is_some();
    let active_tab = router.active();

    tracing::debug!(session_id = %session_id, path = %payload.path, ?active_tab, matched, "navigation synced");
    Ok(Json(SyncPathResponse {
        session_id,
        active_tab,
        matched,
    }))
}
