//! Content generation gateway.
//!
//! Requests are answered from a TTL cache, then from remote text-generation
//! providers tried in order, and finally from deterministic templates, so a
//! well-formed request always gets content back.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

pub mod cache;
pub mod config;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod rate_limit;
pub mod state;
pub mod store;

use crate::handlers::{
    delete_content_handler, export_content_handler, generate_handler, get_content_handler,
    health_handler, list_contents_handler, metrics_handler, options_handler,
};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/options", get(options_handler))
        .route("/api/generate", post(generate_handler))
        .route("/api/contents", get(list_contents_handler))
        .route(
            "/api/contents/{id}",
            get(get_content_handler).delete(delete_content_handler),
        )
        .route("/api/contents/{id}/export", get(export_content_handler))
        .with_state(state)
}

// Sweeps expired cache entries and finished rate-limit windows so neither
// map grows without bound
pub async fn expiry_sweeper(state: Arc<AppState>, every: Duration) {
    let mut interval = interval(every);

    tracing::info!("Expiry sweeper started (interval: {:?})", every);

    loop {
        interval.tick().await;
        sweep_expired(&state);
    }
}

// One sweep pass, returns (cache entries, rate-limit entries) removed
pub fn sweep_expired(state: &AppState) -> (usize, usize) {
    let cache = state.orchestrator.cache();
    let cache_removed = cache.purge_expired();
    let clients_removed = state.rate_limiter.purge_expired();
    if cache_removed + clients_removed > 0 {
        tracing::debug!(
            cache_removed,
            clients_removed,
            cache_remaining = cache.len(),
            clients_remaining = state.rate_limiter.len(),
            "swept expired entries"
        );
    }
    (cache_removed, clients_removed)
}
