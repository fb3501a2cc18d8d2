//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartLine, inputs, summaries)
//! - The session-local cart store
//! - Business logic helpers (cart ids, formatting)
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod store;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use store::CartStore;
