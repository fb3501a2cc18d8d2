//! Session-local shopping cart
//!
//! `CartStore` keeps at most one line per product id, in insertion order.
//! All operations are total: unknown ids are ignored and non-positive
//! quantities on update remove the line.

use super::models::{CartLine, CartSummary};
use crate::catalog::models::Product;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of `product`, merging into an existing line.
    /// Adding zero units does nothing.
    pub fn add(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(existing) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Sets the quantity exactly; `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    pub fn increment(&mut self, product_id: &str) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrementing a line with quantity 1 removes it.
    pub fn decrement(&mut self, product_id: &str) {
        if let Some(quantity) = self.get(product_id).map(|l| l.quantity) {
            self.update_quantity(product_id, i64::from(quantity) - 1);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of line subtotals; lines with an unparsable price count as zero.
    pub fn total_value(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn summary(&self, cart_id: impl Into<String>) -> CartSummary {
        CartSummary {
            cart_id: cart_id.into(),
            lines: self.lines.clone(),
            total_items: self.total_items(),
            total_value: self.total_value(),
        }
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(id: &str, price: &str) -> Product {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Product {}", id),
            "price": price,
            "category": "SOLAR_PANEL"
        }))
        .unwrap()
    }

    #[test]
    fn re_adding_merges_quantities() {
        let mut cart = CartStore::new();
        cart.add(product("panel", "200"), 2);
        cart.add(product("panel", "200"), 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("panel").unwrap().quantity, 5);
    }

    #[test]
    fn update_sets_exact_quantity() {
        let mut cart = CartStore::new();
        cart.add(product("panel", "200"), 4);

        cart.update_quantity("panel", 2);
        assert_eq!(cart.get("panel").unwrap().quantity, 2);

        cart.update_quantity("panel", 0);
        assert!(cart.get("panel").is_none());
    }

    #[test]
    fn adding_zero_units_creates_no_line() {
        let mut cart = CartStore::new();
        cart.add(product("panel", "200"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn negative_update_removes_line() {
        let mut cart = CartStore::new();
        cart.add(product("battery", "3000"), 1);
        cart.update_quantity("battery", -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut cart = CartStore::new();
        cart.add(product("panel", "200"), 1);

        cart.remove("ghost");
        cart.update_quantity("ghost", 7);
        cart.increment("ghost");
        cart.decrement("ghost");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn decrement_to_zero_removes_line() {
        let mut cart = CartStore::new();
        cart.add(product("inverter", "900"), 1);
        cart.increment("inverter");
        assert_eq!(cart.get("inverter").unwrap().quantity, 2);

        cart.decrement("inverter");
        cart.decrement("inverter");
        assert!(cart.get("inverter").is_none());
    }

    #[test]
    fn totals_skip_unparsable_prices() {
        let mut cart = CartStore::new();
        cart.add(product("inverter", "1200.50"), 2);
        cart.add(product("mystery", "bad"), 3);

        assert_eq!(cart.total_items(), 5);
        assert!((cart.total_value() - 2401.00).abs() < 1e-9);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = CartStore::new();
        cart.add(product("a", "1"), 1);
        cart.add(product("b", "2"), 2);

        cart.clear();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_value(), 0.0);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = CartStore::new();
        cart.add(product("b", "1"), 1);
        cart.add(product("a", "1"), 1);
        cart.add(product("b", "1"), 1);

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn summary_reports_totals() {
        let mut cart = CartStore::new();
        cart.add(product("a", "10"), 3);

        let summary = cart.summary("cart-1");
        assert_eq!(summary.cart_id, "cart-1");
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_value, 30.0);
    }
}
