//! Product Catalog Module
//!
//! This module contains the public product catalog logic, including:
//! - Product and search wire models
//! - The product search collaborator and its HTTP client
//! - Per-page query state (filters, pagination, results)
//! - The async session driving searches for a page
//! - REST API handlers

pub mod handlers;
pub mod models;
pub mod query;
pub mod search;
pub mod session;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Product, ProductCategory, StockStatus};
pub use query::{CatalogQuery, CatalogSnapshot, QueryOptions, StaleResponsePolicy};
pub use search::{HttpProductSearch, ProductSearch};
pub use session::CatalogSession;
