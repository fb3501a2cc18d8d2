//! Environment-driven service configuration.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use crate::catalog::query::{QueryOptions, StaleResponsePolicy};
use crate::error::ConfigError;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:3000/api/products/search";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub search_url: Url,
    pub search_timeout: Duration,
    pub log_json: bool,
    pub query_options: QueryOptions,
}

impl AppConfig {
    /// Reads `MARKETPLACE_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = parse_var(&lookup, "MARKETPLACE_BIND", DEFAULT_BIND, |v| {
            v.parse::<SocketAddr>().ok()
        })?;
        let search_url =
            parse_var(&lookup, "MARKETPLACE_SEARCH_URL", DEFAULT_SEARCH_URL, |v| Url::parse(v).ok())?;
        let timeout_secs = parse_var(
            &lookup,
            "MARKETPLACE_SEARCH_TIMEOUT_SECS",
            &DEFAULT_SEARCH_TIMEOUT_SECS.to_string(),
            |v| v.parse::<u64>().ok(),
        )?;
        let log_json = parse_var(&lookup, "MARKETPLACE_LOG_JSON", "false", parse_bool)?;
        let reset_page_on_filter_change =
            parse_var(&lookup, "MARKETPLACE_RESET_PAGE_ON_FILTER", "false", parse_bool)?;
        let stale_policy = parse_var(
            &lookup,
            "MARKETPLACE_STALE_POLICY",
            "latest-issued",
            parse_stale_policy,
        )?;

        Ok(Self {
            bind,
            search_url,
            search_timeout: Duration::from_secs(timeout_secs),
            log_json,
            query_options: QueryOptions {
                stale_policy,
                reset_page_on_filter_change,
            },
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    parse(raw.trim()).ok_or_else(|| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

fn parse_stale_policy(value: &str) -> Option<StaleResponsePolicy> {
    match value {
        "latest-issued" => Some(StaleResponsePolicy::LatestIssuedWins),
        "last-resolved" => Some(StaleResponsePolicy::LastResolvedWins),
        _ => None,
    }
}
