use lazy_static::lazy_static;
use prometheus::{
    Counter, Gauge, Histogram, IntCounterVec, register_counter, register_gauge,
    register_histogram, register_int_counter_vec,
};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("content_gateway_requests_total", "Total number of generate requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter =
        register_counter!("content_gateway_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("content_gateway_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("content_gateway_cache_misses_total", "Total cache misses").unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("content_gateway_cache_size", "Current number of items in cache").unwrap();
    pub static ref PROVIDER_FAILURES: IntCounterVec = register_int_counter_vec!(
        "content_gateway_provider_failures_total",
        "Failed provider calls by provider",
        &["provider"]
    )
    .unwrap();
    pub static ref FALLBACK_TOTAL: Counter =
        register_counter!("content_gateway_fallback_total", "Responses served from fallback templates").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "content_gateway_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
}
