use clap::Parser; // for cli
use std::sync::Arc;

use content_gateway::cache::ResultCache;
use content_gateway::config::Args;
use content_gateway::logging::init_logging;
use content_gateway::orchestrator::GenerationOrchestrator;
use content_gateway::provider::HttpProviderClient;
use content_gateway::rate_limit::RateLimiter;
use content_gateway::state::AppState;
use content_gateway::{expiry_sweeper, router};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_json);

    let providers = args.providers();
    for (i, p) in providers.iter().enumerate() {
        tracing::info!(
            "  [{}] {} ({:?}) {} {}",
            i + 1,
            p.name,
            p.kind,
            p.endpoint,
            if p.enabled { "enabled" } else { "disabled" }
        );
    }

    let client = HttpProviderClient::new(reqwest::Client::new(), args.provider_timeout());
    let orchestrator = GenerationOrchestrator::new(
        providers,
        Arc::new(client),
        ResultCache::new(args.cache_ttl()),
    );
    let state = AppState::new(
        orchestrator,
        RateLimiter::new(args.rate_limit, args.rate_window()),
    );

    // spawn the background sweeper for cache and rate-limit entries
    tokio::spawn(expiry_sweeper(Arc::clone(&state), args.purge_interval()));

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gateway running on http://localhost:{}", args.port);
    tracing::info!("Cache TTL: {} seconds", args.cache_ttl);
    tracing::info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit,
        args.rate_window
    );
    axum::serve(listener, app).await
}
