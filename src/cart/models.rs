//! Shopping Cart Domain Models
//!
//! This module contains the cart line type and the request/response bodies
//! of the cart endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::models::Product;

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for add-to-cart requests
fn default_quantity() -> u32 {
    1
}

/// One product in the cart with its quantity (always at least 1)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity
    pub fn subtotal(&self) -> f64 {
        self.product.unit_price() * f64::from(self.quantity)
    }
}

/// Body of `POST /cart/add`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    /// Optional cart identifier; a new cart is created when absent
    pub cart_id: Option<String>,

    pub product: Product,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Body of `POST /cart/remove`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartInput {
    pub cart_id: String,
    pub product_id: String,
}

/// Body of `POST /cart/update`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityInput {
    pub cart_id: String,
    pub product_id: String,
    /// Zero or negative removes the line
    pub quantity: i64,
}

/// Body of `POST /cart/clear`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearCartInput {
    pub cart_id: String,
}

/// Cart state returned by every cart endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub cart_id: String,
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub total_value: f64,
}
