use std::sync::Arc;

use crate::orchestrator::GenerationOrchestrator;
use crate::rate_limit::RateLimiter;
use crate::store::ContentStore;

// app's shared state, built once in main
pub struct AppState {
    pub orchestrator: GenerationOrchestrator,
    pub store: ContentStore,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(orchestrator: GenerationOrchestrator, rate_limiter: RateLimiter) -> Arc<Self> {
        Arc::new(Self {
            orchestrator,
            store: ContentStore::new(),
            rate_limiter,
        })
    }
}
