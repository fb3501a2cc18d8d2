//! Path to dashboard tab resolution
//!
//! The dashboard shells highlight one tab based on the current URL. Matching
//! runs over an ordered table of (matcher, tab) pairs and the first match
//! wins; a path nothing matches leaves the active tab untouched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DashboardTab {
    #[default]
    Overview,
    Profile,
    Marketplace,
    Cart,
    Orders,
    Projects,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatcher {
    Exact(&'static str),
    Prefix(&'static str),
}

impl PathMatcher {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatcher::Exact(expected) => path == *expected,
            // Only whole segments count: `/orders` covers `/orders/42`, not `/orders-old`.
            PathMatcher::Prefix(prefix) => path
                .strip_prefix(prefix.trim_end_matches('/'))
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

/// Routes shared by the user (`/dashboard`) and contractor (`/contractor`) shells.
///
/// Prefix rules sit after the exact ones they would otherwise shadow.
pub const DEFAULT_ROUTES: &[(PathMatcher, DashboardTab)] = &[
    (PathMatcher::Exact("/dashboard"), DashboardTab::Overview),
    (PathMatcher::Exact("/dashboard/profile"), DashboardTab::Profile),
    (PathMatcher::Exact("/dashboard/marketplace"), DashboardTab::Marketplace),
    (PathMatcher::Prefix("/dashboard/marketplace/product/"), DashboardTab::Marketplace),
    (PathMatcher::Exact("/dashboard/cart"), DashboardTab::Cart),
    (PathMatcher::Prefix("/dashboard/orders"), DashboardTab::Orders),
    (PathMatcher::Prefix("/dashboard/projects"), DashboardTab::Projects),
    (PathMatcher::Exact("/dashboard/settings"), DashboardTab::Settings),
    (PathMatcher::Exact("/contractor"), DashboardTab::Overview),
    (PathMatcher::Exact("/contractor/profile"), DashboardTab::Profile),
    (PathMatcher::Exact("/contractor/marketplace"), DashboardTab::Marketplace),
    (PathMatcher::Prefix("/contractor/marketplace/product/"), DashboardTab::Marketplace),
    (PathMatcher::Exact("/contractor/cart"), DashboardTab::Cart),
    (PathMatcher::Prefix("/contractor/orders"), DashboardTab::Orders),
    (PathMatcher::Prefix("/contractor/projects"), DashboardTab::Projects),
    (PathMatcher::Exact("/contractor/settings"), DashboardTab::Settings),
];

/// Holds the active tab for one dashboard shell.
#[derive(Debug, Clone)]
pub struct ActiveTabRouter {
    routes: &'static [(PathMatcher, DashboardTab)],
    active: DashboardTab,
}

impl Default for ActiveTabRouter {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTES)
    }
}

impl ActiveTabRouter {
    pub fn new(routes: &'static [(PathMatcher, DashboardTab)]) -> Self {
        Self {
            routes,
            active: DashboardTab::default(),
        }
    }

    pub fn active(&self) -> DashboardTab {
        self.active
    }

    /// Pure lookup; the query string and trailing slashes are ignored.
    pub fn resolve(&self, path: &str) -> Option<DashboardTab> {
        let path = normalize(path);
        self.routes
            .iter()
            .find(|(matcher, _)| matcher.matches(path))
            .map(|(_, tab)| *tab)
    }

    /// Updates the active tab when `path` matches and returns the matched tab.
    /// `None` means the previous tab was kept.
    pub fn sync(&mut self, path: &str) -> Option<DashboardTab> {
        let matched = self.resolve(path);
        if let Some(tab) = matched {
            self.active = tab;
        }
        matched
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
