use solar_marketplace::catalog::HttpProductSearch;
use solar_marketplace::config::AppConfig;
use solar_marketplace::router::create_app_router;
use solar_marketplace::state::AppState;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    init_tracing(config.log_json);

    // Initialize application state
    let search = HttpProductSearch::new(config.search_url.clone(), config.search_timeout)
        .map_err(|e| e.to_string())?;
    let state = Arc::new(AppState::new(Arc::new(search), config.query_options));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    info!(
        bind = %config.bind,
        search_url = %config.search_url,
        stale_policy = ?config.query_options.stale_policy,
        "marketplace service starting"
    );

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| format!("failed to bind {}: {}", config.bind, e))?;
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server stopped");
        return Err(e.to_string());
    }
    Ok(())
}
