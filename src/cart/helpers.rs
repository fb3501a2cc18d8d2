//! Shopping Cart Helpers
//!
//! This module contains helper functions for cart identifiers and formatting.

use super::models::CartLine;
use uuid::Uuid;

/// Returns the provided `cart_id` or creates a new UUID string when `None`
/// or blank.
pub fn get_or_create_cart_id(cart_id: Option<String>) -> String {
    cart_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Hybrid Inverter, 1x LiFePO4 Battery"`.
pub fn format_line_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|l| format!("{}x {}", l.quantity, l.product.name))
        .collect::<Vec<_>>()
        .join(", ")
}
