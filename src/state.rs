//! Application State Management
//!
//! Carts, catalog pages and dashboard tab selections are all keyed by a
//! client-held identifier. Each entry has a single owner here and is handed
//! to the handlers that need it.

use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;

use crate::cart::store::CartStore;
use crate::catalog::query::QueryOptions;
use crate::catalog::search::ProductSearch;
use crate::catalog::session::CatalogSession;
use crate::navigation::tabs::ActiveTabRouter;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// In-memory carts, keyed by cart id. Nothing is persisted.
    pub carts: DashMap<String, CartStore>,

    /// One catalog page state per view id.
    pub catalog_views: DashMap<String, CatalogSession>,

    /// Active dashboard tab per navigation session.
    pub tab_routers: DashMap<String, ActiveTabRouter>,

    search: Arc<dyn ProductSearch>,
    query_options: QueryOptions,
}

impl AppState {
    pub fn new(search: Arc<dyn ProductSearch>, query_options: QueryOptions) -> Self {
        Self {
            carts: DashMap::new(),
            catalog_views: DashMap::new(),
            tab_routers: DashMap::new(),
            search,
            query_options,
        }
    }

    /// Returns the catalog session for `view_id`, creating it on first use.
    ///
    /// The second value is true when the session was just created.
    pub fn catalog_view(&self, view_id: &str) -> (CatalogSession, bool) {
        match self.catalog_views.entry(view_id.to_string()) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => {
                let session = CatalogSession::new(self.search.clone(), self.query_options);
                (entry.insert(session).value().clone(), true)
            }
        }
    }
}
