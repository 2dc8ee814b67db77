use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::GatewayError;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{GenerateResponse, GenerationMetadata, GenerationRequest, word_count};
use crate::state::AppState;

// Client key for rate limiting: first forwarded address, else one shared bucket
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("global")
        .to_string()
}

// Whole milliseconds, saturating instead of wrapping
fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, GatewayError> {
    REQUEST_TOTAL.inc();

    let key = client_key(&headers);
    if !state.rate_limiter.check(&key) {
        RATE_LIMITED_TOTAL.inc();
        tracing::warn!(client = %key, "rate limit exceeded");
        return Err(GatewayError::RateLimited);
    }

    let Json(payload) = payload.map_err(|e| GatewayError::validation(e.body_text()))?;
    let request = payload.validated()?;
    let start_time = Instant::now();

    let generation = state.orchestrator.generate(&request).await;

    let elapsed = start_time.elapsed();
    REQUEST_LATENCY.observe(elapsed.as_secs_f64());
    let elapsed_ms = millis(elapsed);

    let generated_at = Utc::now();
    let stored = state.store.insert(
        request.topic.clone(),
        request.content_type,
        request.language,
        request.tone,
        generation.content.clone(),
        generation.source.clone(),
        generated_at,
    );

    tracing::info!(
        id = %stored.id,
        content_type = request.content_type.as_str(),
        elapsed_ms,
        "content generated"
    );

    Ok(Json(GenerateResponse {
        id: stored.id,
        metadata: GenerationMetadata {
            topic: request.topic,
            content_type: request.content_type,
            language: request.language,
            tone: request.tone,
            word_count: word_count(&generation.content),
            character_count: generation.content.chars().count(),
            generation_time_ms: elapsed_ms,
            source: generation.source,
            generated_at,
        },
        content: generation.content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_key_uses_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.1, 10.0.0.2"));
        assert_eq!(client_key(&headers), "10.0.0.1");
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_client_key_defaults_to_global() {
        assert_eq!(client_key(&HeaderMap::new()), "global");
    }
}
