//! REST API handlers for shopping cart operations
//!
//! Every endpoint answers with the full [`CartSummary`] so pages can render
//! the cart badge and drawer from one response.

use super::{helpers::*, models::*, store::CartStore};
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/add", post(add_to_cart))
        .route("/cart/remove", post(remove_from_cart))
        .route("/cart/update", post(update_quantity))
        .route("/cart/clear", post(clear_cart))
        .route("/cart/:cart_id", get(get_cart))
}

/// Endpoint: POST /cart/add
/// Adds a product to the cart, creating the cart when needed.
async fn add_to_cart(
    State(state): State<SharedState>,
    Json(payload): Json<AddToCartInput>,
) -> Result<Json<CartSummary>, AppError> {
    if payload.quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".into()));
    }
    if !payload.product.is_purchasable() {
        return Err(AppError::BadRequest(format!(
            "product {} is out of stock",
            payload.product.id
        )));
    }

    let cart_id = get_or_create_cart_id(payload.cart_id);
    let mut cart = state.carts.entry(cart_id.clone()).or_default();
    cart.add(payload.product, payload.quantity);

    tracing::info!(
        cart_id = %cart_id,
        total_items = cart.total_items(),
        "added to cart"
    );
    Ok(Json(cart.summary(cart_id)))
}

/// Endpoint: POST /cart/remove
async fn remove_from_cart(
    State(state): State<SharedState>,
    Json(payload): Json<RemoveFromCartInput>,
) -> Result<Json<CartSummary>, AppError> {
    with_cart(&state, &payload.cart_id, |cart| cart.remove(&payload.product_id))
}

/// Endpoint: POST /cart/update
/// Sets a line's quantity exactly; zero or below removes the line.
async fn update_quantity(
    State(state): State<SharedState>,
    Json(payload): Json<UpdateQuantityInput>,
) -> Result<Json<CartSummary>, AppError> {
    with_cart(&state, &payload.cart_id, |cart| {
        cart.update_quantity(&payload.product_id, payload.quantity)
    })
}

/// Endpoint: POST /cart/clear
async fn clear_cart(
    State(state): State<SharedState>,
    Json(payload): Json<ClearCartInput>,
) -> Result<Json<CartSummary>, AppError> {
    with_cart(&state, &payload.cart_id, |cart| {
        if !cart.is_empty() {
            tracing::info!(cart_id = %payload.cart_id, lines = %format_line_summary(cart.lines()), "clearing cart");
        }
        cart.clear()
    })
}

/// Endpoint: GET /cart/{cart_id}
/// Unknown carts read as empty.
async fn get_cart(
    State(state): State<SharedState>,
    Path(cart_id): Path<String>,
) -> Json<CartSummary> {
    let summary = match state.carts.get(&cart_id) {
        Some(cart) => cart.summary(cart_id.clone()),
        None => CartStore::new().summary(cart_id),
    };
    Json(summary)
}

fn with_cart(
    state: &SharedState,
    cart_id: &str,
    change: impl FnOnce(&mut CartStore),
) -> Result<Json<CartSummary>, AppError> {
    let mut cart = state
        .carts
        .get_mut(cart_id)
        .ok_or_else(|| AppError::NotFound(format!("cart {}", cart_id)))?;
    change(cart.value_mut());
    tracing::debug!(cart_id, total_items = cart.total_items(), "cart updated");
    Ok(Json(cart.summary(cart_id)))
}
