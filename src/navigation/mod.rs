//! Dashboard Navigation Module
//!
//! Keeps the user and contractor dashboard shells' active tab in step with
//! the current URL path.

pub mod handlers;
pub mod tabs;

pub use handlers::routes;
pub use tabs::{ActiveTabRouter, DashboardTab, PathMatcher};
