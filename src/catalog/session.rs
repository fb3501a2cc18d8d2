//! Async driver for a catalog page
//!
//! A [`CatalogSession`] pairs one page's [`CatalogQuery`] with the search
//! collaborator. Searches run without holding the state lock, so new filter
//! changes are accepted while a query is in flight.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::query::{ApplyOutcome, CatalogQuery, CatalogSnapshot, IssuedQuery, QueryOptions};
use super::search::ProductSearch;

#[derive(Clone)]
pub struct CatalogSession {
    query: Arc<Mutex<CatalogQuery>>,
    search: Arc<dyn ProductSearch>,
}

impl CatalogSession {
    pub fn new(search: Arc<dyn ProductSearch>, options: QueryOptions) -> Self {
        Self {
            query: Arc::new(Mutex::new(CatalogQuery::new(options))),
            search,
        }
    }

    /// Runs `change` against the page state and returns whatever query it issued.
    pub async fn update<F>(&self, change: F) -> Option<IssuedQuery>
    where
        F: FnOnce(&mut CatalogQuery) -> Option<IssuedQuery>,
    {
        let mut query = self.query.lock().await;
        change(&mut query)
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.query.lock().await.snapshot()
    }

    /// Runs the search in a background task and folds the result in when it
    /// resolves. The task finishes even if the caller stops waiting.
    pub fn dispatch(&self, issued: IssuedQuery) -> JoinHandle<ApplyOutcome> {
        let session = self.clone();
        tokio::spawn(async move { session.execute(issued).await })
    }

    /// Runs the search and returns the resulting page state.
    pub async fn fetch(&self, issued: IssuedQuery) -> CatalogSnapshot {
        if let Err(e) = self.dispatch(issued).await {
            tracing::error!(error = %e, "catalog search task failed");
        }
        self.snapshot().await
    }

    async fn execute(&self, mut issued: IssuedQuery) -> ApplyOutcome {
        loop {
            let result = self.search.search(&issued.request).await;
            let outcome = self.query.lock().await.apply(issued.token, result);
            match outcome {
                ApplyOutcome::Clamped(follow_up) => issued = follow_up,
                outcome => return outcome,
            }
        }
    }
}
