use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::models::OptionsResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let providers: Vec<serde_json::Value> = state
        .orchestrator
        .providers()
        .iter()
        .map(|p| serde_json::json!({ "name": p.name, "enabled": p.enabled }))
        .collect();

    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "providers": providers,
        "cache_entries": state.orchestrator.cache().len(),
    }))
}

// Accepted values for the enum fields of a generate request
pub async fn options_handler() -> Json<OptionsResponse> {
    Json(OptionsResponse::all())
}
