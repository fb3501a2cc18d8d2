//! Catalog query state
//!
//! [`CatalogQuery`] holds the filter and pagination state of one catalog page
//! together with the last results received from the search service. Every
//! setter that changes the query returns an [`IssuedQuery`] describing the
//! request the caller must run; the result is handed back through
//! [`CatalogQuery::apply`]. The state itself never performs I/O.

use serde::Serialize;

use super::models::{
    PaginationRequest, Product, ProductCategory, SearchFilters, SearchRequest, SearchResponse,
    APPROVAL_STATUS, LISTING_STATUS, PAGE_SIZE, SORT_BY, SORT_ORDER,
};
use crate::error::CatalogError;

/// Upper bound of the price filter before the user narrows it
pub const DEFAULT_MAX_PRICE: f64 = 1_000_000.0;

/// Identifies one issued search. Tokens grow monotonically per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

/// What to do with a response that arrives after a newer query was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Only the most recently issued query may update the page.
    #[default]
    LatestIssuedWins,
    /// Every response is applied as it resolves, so the slowest one wins.
    LastResolvedWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryOptions {
    pub stale_policy: StaleResponsePolicy,
    /// Jump back to page 1 when search text, category or price range change.
    pub reset_page_on_filter_change: bool,
}

/// A search the caller has to run and report back.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedQuery {
    pub token: RequestToken,
    pub request: SearchRequest,
}

/// A batch of filter and pagination edits. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChange {
    pub search: Option<String>,
    /// `Some(None)` clears the category filter.
    pub category: Option<Option<ProductCategory>>,
    /// Bounds left as `None` keep their current value.
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Applied,
    /// The response belonged to a superseded query and was dropped.
    Discarded,
    /// The response reported fewer pages than the current page. The page was
    /// moved to the last one and this query fetches it.
    Clamped(IssuedQuery),
}

/// Serializable view of the page state
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub search: String,
    pub category: Option<ProductCategory>,
    pub min_price: f64,
    pub max_price: f64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[derive(Debug, Clone)]
pub struct CatalogQuery {
    search: String,
    category: Option<ProductCategory>,
    min_price: f64,
    max_price: f64,
    page: u32,

    products: Vec<Product>,
    /// Zero until the first successful response.
    total_pages: u32,
    loading: bool,
    error: Option<String>,

    options: QueryOptions,
    next_token: u64,
    latest_issued: Option<RequestToken>,
    last_request: Option<SearchRequest>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new(QueryOptions::default())
    }
}

impl CatalogQuery {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            search: String::new(),
            category: None,
            min_price: 0.0,
            max_price: DEFAULT_MAX_PRICE,
            page: 1,
            products: Vec::new(),
            total_pages: 0,
            loading: false,
            error: None,
            options,
            next_token: 0,
            latest_issued: None,
            last_request: None,
        }
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Builds the request matching the current filters and page.
    pub fn current_request(&self) -> SearchRequest {
        SearchRequest {
            filters: SearchFilters {
                search: self.search.clone(),
                category_id: self.category.map(|c| c.as_str().to_string()),
                min_price: self.min_price,
                max_price: self.max_price,
                status: LISTING_STATUS.to_string(),
                approval_status: APPROVAL_STATUS.to_string(),
                in_stock_only: true,
            },
            pagination: PaginationRequest {
                page: self.page,
                limit: PAGE_SIZE,
                sort_by: SORT_BY.to_string(),
                sort_order: SORT_ORDER.to_string(),
            },
        }
    }

    // =========================================================================
    // Filter and pagination transitions
    // =========================================================================

    pub fn set_search(&mut self, text: impl Into<String>) -> Option<IssuedQuery> {
        self.change(FilterChange {
            search: Some(text.into()),
            ..Default::default()
        })
    }

    pub fn set_category(&mut self, category: Option<ProductCategory>) -> Option<IssuedQuery> {
        self.change(FilterChange {
            category: Some(category),
            ..Default::default()
        })
    }

    /// Bounds given in the wrong order are swapped.
    pub fn set_price_range(&mut self, min: f64, max: f64) -> Option<IssuedQuery> {
        self.change(FilterChange {
            min_price: Some(min),
            max_price: Some(max),
            ..Default::default()
        })
    }

    /// Moves to `page`, clamped into the known page range.
    pub fn set_page(&mut self, page: u32) -> Option<IssuedQuery> {
        self.change(FilterChange {
            page: Some(page),
            ..Default::default()
        })
    }

    /// Applies several changes at once and issues at most one query, and
    /// only when the resulting request differs from the current state.
    pub fn change(&mut self, change: FilterChange) -> Option<IssuedQuery> {
        let mut filters_changed = false;

        if let Some(text) = change.search {
            if text != self.search {
                self.search = text;
                filters_changed = true;
            }
        }
        if let Some(category) = change.category {
            if category != self.category {
                self.category = category;
                filters_changed = true;
            }
        }
        if change.min_price.is_some() || change.max_price.is_some() {
            let min = change.min_price.unwrap_or(self.min_price);
            let max = change.max_price.unwrap_or(self.max_price);
            let (min, max) = if min <= max { (min, max) } else { (max, min) };
            if min != self.min_price || max != self.max_price {
                self.min_price = min;
                self.max_price = max;
                filters_changed = true;
            }
        }

        let mut page_changed = false;
        if filters_changed && self.options.reset_page_on_filter_change && self.page != 1 {
            self.page = 1;
            page_changed = true;
        }
        if let Some(page) = change.page {
            let page = self.clamp_page(page);
            if page != self.page {
                self.page = page;
                page_changed = true;
            }
        }

        if filters_changed || page_changed {
            Some(self.issue(self.current_request()))
        } else {
            None
        }
    }

    pub fn next_page(&mut self) -> Option<IssuedQuery> {
        if !self.can_go_next() {
            return None;
        }
        self.set_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> Option<IssuedQuery> {
        if !self.can_go_previous() {
            return None;
        }
        self.set_page(self.page - 1)
    }

    /// Issues the current query unconditionally, e.g. on first display.
    pub fn refresh(&mut self) -> IssuedQuery {
        self.issue(self.current_request())
    }

    /// Re-issues the last query exactly as it was sent.
    pub fn retry(&mut self) -> IssuedQuery {
        let request = self
            .last_request
            .clone()
            .unwrap_or_else(|| self.current_request());
        self.issue(request)
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// Folds a search outcome into the page state.
    ///
    /// On failure the previous products stay visible and the message is kept
    /// verbatim for display. When the results report fewer pages than the
    /// current page, the page is clamped and the returned
    /// [`ApplyOutcome::Clamped`] query must be run to fetch it.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<SearchResponse, CatalogError>,
    ) -> ApplyOutcome {
        if self.options.stale_policy == StaleResponsePolicy::LatestIssuedWins
            && self.latest_issued != Some(token)
        {
            tracing::debug!(?token, latest = ?self.latest_issued, "discarding superseded catalog response");
            return ApplyOutcome::Discarded;
        }

        self.loading = false;
        match result {
            Ok(response) => {
                tracing::debug!(
                    ?token,
                    products = response.data.len(),
                    total_pages = response.pagination.total_pages,
                    "catalog results applied"
                );
                self.products = response.data;
                self.total_pages = response.pagination.total_pages;
                self.error = None;
                if self.total_pages > 0 && self.page > self.total_pages {
                    self.page = self.total_pages;
                    return ApplyOutcome::Clamped(self.issue(self.current_request()));
                }
            }
            Err(err) => {
                tracing::warn!(?token, error = %err, "catalog fetch failed");
                self.error = Some(err.to_string());
            }
        }
        ApplyOutcome::Applied
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            search: self.search.clone(),
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
            page: self.page,
            page_size: PAGE_SIZE,
            total_pages: self.total_pages,
            products: self.products.clone(),
            loading: self.loading,
            error: self.error.clone(),
            can_go_previous: self.can_go_previous(),
            can_go_next: self.can_go_next(),
        }
    }

    fn clamp_page(&self, page: u32) -> u32 {
        let upper = if self.total_pages == 0 {
            u32::MAX
        } else {
            self.total_pages
        };
        page.clamp(1, upper)
    }

    fn issue(&mut self, request: SearchRequest) -> IssuedQuery {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest_issued = Some(token);
        self.last_request = Some(request.clone());
        self.loading = true;
        tracing::debug!(
            ?token,
            search = %request.filters.search,
            page = request.pagination.page,
            "catalog query issued"
        );
        IssuedQuery { token, request }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::PaginationInfo;

    fn product(id: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Product {}", id),
            "price": "100"
        }))
        .unwrap()
    }

    fn response(ids: &[&str], total_pages: u32) -> SearchResponse {
        SearchResponse {
            data: ids.iter().map(|id| product(id)).collect(),
            pagination: PaginationInfo {
                total_pages,
                ..Default::default()
            },
        }
    }

    fn loaded(total_pages: u32, options: QueryOptions) -> CatalogQuery {
        let mut query = CatalogQuery::new(options);
        let issued = query.refresh();
        query.apply(issued.token, Ok(response(&["a"], total_pages)));
        query
    }

    #[test]
    fn request_carries_fixed_filters_and_sort() {
        let mut query = CatalogQuery::default();
        query.set_category(Some(ProductCategory::Battery));
        let request = query.current_request();

        assert_eq!(request.filters.category_id.as_deref(), Some("BATTERY"));
        assert_eq!(request.filters.status, "ACTIVE");
        assert_eq!(request.filters.approval_status, "APPROVED");
        assert!(request.filters.in_stock_only);
        assert_eq!(request.pagination.limit, 12);
        assert_eq!(request.pagination.sort_by, "created_at");
        assert_eq!(request.pagination.sort_order, "desc");
    }

    #[test]
    fn search_change_issues_exactly_one_query() {
        let mut query = loaded(5, QueryOptions::default());
        query.set_page(3);

        let issued = query.set_search("inverter").expect("query issued");
        assert_eq!(issued.request.filters.search, "inverter");
        // page is kept unless reset is switched on
        assert_eq!(issued.request.pagination.page, 3);

        assert!(query.set_search("inverter").is_none());
    }

    #[test]
    fn search_change_resets_page_when_configured() {
        let options = QueryOptions {
            reset_page_on_filter_change: true,
            ..Default::default()
        };
        let mut query = loaded(5, options);
        query.set_page(4);

        let issued = query.set_search("battery").unwrap();
        assert_eq!(issued.request.pagination.page, 1);
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn pagination_buttons_clamp_at_edges() {
        let mut query = loaded(5, QueryOptions::default());
        assert!(!query.can_go_previous());
        assert!(query.previous_page().is_none());
        assert_eq!(query.page(), 1);

        let issued = query.set_page(5).unwrap();
        query.apply(issued.token, Ok(response(&["z"], 5)));
        assert!(!query.can_go_next());
        assert!(query.next_page().is_none());
        assert_eq!(query.page(), 5);

        assert!(query.set_page(99).is_none());
        assert_eq!(query.page(), 5);
        assert_eq!(query.set_page(0).unwrap().request.pagination.page, 1);
    }

    #[test]
    fn next_is_disabled_before_totals_are_known() {
        let mut query = CatalogQuery::default();
        assert!(!query.can_go_next());
        assert!(query.next_page().is_none());
    }

    #[test]
    fn shrinking_results_pull_page_back_in_range() {
        let mut query = loaded(5, QueryOptions::default());
        query.set_page(5);
        let issued = query.set_search("rare").unwrap();
        let follow_up = match query.apply(issued.token, Ok(response(&[], 2))) {
            ApplyOutcome::Clamped(follow_up) => follow_up,
            other => panic!("expected a follow-up query, got {:?}", other),
        };
        assert_eq!(query.page(), 2);
        assert_eq!(follow_up.request.pagination.page, 2);
        assert_eq!(follow_up.request.filters.search, "rare");
        assert!(query.is_loading());

        assert_eq!(
            query.apply(follow_up.token, Ok(response(&["r1", "r2"], 2))),
            ApplyOutcome::Applied
        );
        assert_eq!(query.page(), 2);
        let ids: Vec<_> = query.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["r1", "r2"]);
        assert!(!query.is_loading());
    }

    #[test]
    fn failure_keeps_products_and_sets_error() {
        let mut query = loaded(3, QueryOptions::default());
        let issued = query.set_search("x").unwrap();
        assert!(query.is_loading());

        let outcome = query.apply(
            issued.token,
            Err(CatalogError::FetchFailed("search service unavailable".into())),
        );

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert!(!query.is_loading());
        assert_eq!(query.error(), Some("search service unavailable"));
        assert_eq!(query.products().len(), 1);
        assert_eq!(query.products()[0].id, "a");
    }

    #[test]
    fn retry_reissues_identical_request_and_success_clears_error() {
        let mut query = loaded(3, QueryOptions::default());
        let failed = query.set_search("x").unwrap();
        query.apply(failed.token, Err(CatalogError::FetchFailed("boom".into())));

        let retried = query.retry();
        assert_eq!(retried.request, failed.request);
        assert!(retried.token > failed.token);

        query.apply(retried.token, Ok(response(&["b", "c"], 3)));
        assert_eq!(query.error(), None);
        assert_eq!(query.products().len(), 2);
    }

    #[test]
    fn last_resolved_wins_lets_slow_response_overwrite() {
        let options = QueryOptions {
            stale_policy: StaleResponsePolicy::LastResolvedWins,
            ..Default::default()
        };
        let mut query = CatalogQuery::new(options);
        let slow = query.set_search("inv").unwrap();
        let fast = query.set_search("inverter").unwrap();

        assert_eq!(query.apply(fast.token, Ok(response(&["fast"], 1))), ApplyOutcome::Applied);
        assert_eq!(query.apply(slow.token, Ok(response(&["slow"], 1))), ApplyOutcome::Applied);

        assert_eq!(query.products()[0].id, "slow");
    }

    #[test]
    fn latest_issued_wins_discards_superseded_response() {
        let mut query = CatalogQuery::default();
        let slow = query.set_search("inv").unwrap();
        let fast = query.set_search("inverter").unwrap();

        assert_eq!(query.apply(fast.token, Ok(response(&["fast"], 1))), ApplyOutcome::Applied);
        assert_eq!(
            query.apply(slow.token, Ok(response(&["slow"], 1))),
            ApplyOutcome::Discarded
        );

        assert_eq!(query.products()[0].id, "fast");
        assert!(!query.is_loading());
    }

    #[test]
    fn batched_change_issues_single_query() {
        let mut query = loaded(4, QueryOptions::default());
        let issued = query
            .change(FilterChange {
                search: Some("lithium".into()),
                category: Some(Some(ProductCategory::Battery)),
                page: Some(2),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(issued.token, RequestToken(2));
        assert_eq!(issued.request.filters.search, "lithium");
        assert_eq!(issued.request.pagination.page, 2);

        assert!(query
            .change(FilterChange {
                search: Some("lithium".into()),
                page: Some(2),
                ..Default::default()
            })
            .is_none());

        let cleared = query.set_category(None).unwrap();
        assert!(cleared.request.filters.category_id.is_none());
    }

    #[test]
    fn single_price_bound_keeps_the_other() {
        let mut query = CatalogQuery::default();
        query.set_price_range(100.0, 500.0).unwrap();

        let issued = query
            .change(FilterChange {
                max_price: Some(400.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(issued.request.filters.min_price, 100.0);
        assert_eq!(issued.request.filters.max_price, 400.0);

        let issued = query
            .change(FilterChange {
                min_price: Some(150.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(issued.request.filters.min_price, 150.0);
        assert_eq!(issued.request.filters.max_price, 400.0);
    }

    #[test]
    fn price_range_is_normalized() {
        let mut query = CatalogQuery::default();
        let issued = query.set_price_range(500.0, 100.0).unwrap();
        assert_eq!(issued.request.filters.min_price, 100.0);
        assert_eq!(issued.request.filters.max_price, 500.0);
        assert!(query.set_price_range(100.0, 500.0).is_none());
    }

    #[test]
    fn snapshot_reports_navigation_flags() {
        let mut query = loaded(2, QueryOptions::default());
        let snapshot = query.snapshot();
        assert!(!snapshot.can_go_previous);
        assert!(snapshot.can_go_next);
        assert_eq!(snapshot.page_size, 12);

        query.next_page();
        let snapshot = query.snapshot();
        assert!(snapshot.can_go_previous);
        assert!(!snapshot.can_go_next);
        assert!(snapshot.loading);
    }
}
