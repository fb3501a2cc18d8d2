//! Solar Marketplace Library
//!
//! This library provides the state behind the customer-facing marketplace
//! pages: the shopping cart, the product catalog query, and dashboard tab
//! selection, exposed over a small JSON API.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod navigation;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
