//! Catalog Domain Models
//!
//! Products are owned by the remote catalog service and consumed read-only.
//! This module also holds the wire shapes exchanged with the product search
//! collaborator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Catalog Constants
// =============================================================================

/// Fixed number of products per catalog page
pub const PAGE_SIZE: u32 = 12;
/// Sort column requested from the search service
pub const SORT_BY: &str = "created_at";
/// Sort direction requested from the search service
pub const SORT_ORDER: &str = "desc";
/// Only active listings are shown to customers
pub const LISTING_STATUS: &str = "ACTIVE";
/// Only approved listings are shown to customers
pub const APPROVAL_STATUS: &str = "APPROVED";

// =============================================================================
// Product
// =============================================================================

/// Category tag attached to every product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Inverter,
    Battery,
    SolarPanel,
    FullSystem,
    /// Absent or unknown category values land here.
    #[default]
    #[serde(other)]
    Unspecified,
}

impl ProductCategory {
    /// Wire identifier used as `categoryId` in search filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Inverter => "INVERTER",
            ProductCategory::Battery => "BATTERY",
            ProductCategory::SolarPanel => "SOLAR_PANEL",
            ProductCategory::FullSystem => "FULL_SYSTEM",
            ProductCategory::Unspecified => "UNSPECIFIED",
        }
    }
}

/// Availability of a product. Out-of-stock products cannot be purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
}

/// A product listing as returned by the catalog service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier assigned by the catalog
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub category: ProductCategory,

    /// Decimal string, kept verbatim
    pub price: String,

    #[serde(default)]
    pub vat_included: bool,

    #[serde(default)]
    pub stock_status: StockStatus,

    /// Free-form specification table; the schema varies by category
    #[serde(default)]
    pub specifications: BTreeMap<String, Value>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl Product {
    /// Parsed unit price. Unparsable prices count as zero.
    pub fn unit_price(&self) -> f64 {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .unwrap_or(0.0)
    }

    pub fn is_purchasable(&self) -> bool {
        self.stock_status == StockStatus::InStock
    }
}

// =============================================================================
// Search Collaborator Wire Shapes
// =============================================================================

/// Filter half of a search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub search: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    pub min_price: f64,
    pub max_price: f64,
    pub status: String,
    pub approval_status: String,
    pub in_stock_only: bool,
}

/// Pagination half of a search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationRequest {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: String,
}

/// Full request sent to the product search service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub filters: SearchFilters,
    pub pagination: PaginationRequest,
}

/// Pagination metadata returned by the search service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub total_pages: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Response returned by the search service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchResponse {
    pub data: Vec<Product>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_deserializes_with_unknown_category() {
        let product: Product = serde_json::from_value(json!({
            "id": "p-1",
            "name": "Hybrid Inverter 5kW",
            "category": "WIND_TURBINE",
            "price": "1200.50",
            "stockStatus": "OUT_OF_STOCK",
            "specifications": { "ratedPower": "5kW", "phases": 1 }
        }))
        .unwrap();

        assert_eq!(product.category, ProductCategory::Unspecified);
        assert_eq!(product.stock_status, StockStatus::OutOfStock);
        assert!(!product.is_purchasable());
        assert_eq!(product.specifications["phases"], json!(1));
        assert!(product.image_url.is_none());
    }

    #[test]
    fn unit_price_treats_garbage_as_zero() {
        let mut product: Product = serde_json::from_value(json!({
            "id": "p-2",
            "name": "Panel",
            "price": " 250.25 "
        }))
        .unwrap();
        assert_eq!(product.unit_price(), 250.25);

        product.price = "call for price".into();
        assert_eq!(product.unit_price(), 0.0);

        product.price = "NaN".into();
        assert_eq!(product.unit_price(), 0.0);
    }

    #[test]
    fn search_filters_omit_missing_category() {
        let filters = SearchFilters {
            search: "inverter".into(),
            category_id: None,
            min_price: 0.0,
            max_price: 1000.0,
            status: LISTING_STATUS.into(),
            approval_status: APPROVAL_STATUS.into(),
            in_stock_only: true,
        };

        let value = serde_json::to_value(&filters).unwrap();
        assert!(value.get("categoryId").is_none());
        assert_eq!(value["approvalStatus"], "APPROVED");
        assert_eq!(value["inStockOnly"], true);
    }
}
