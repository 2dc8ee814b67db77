use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// A single provider call failed. Always recovered by the orchestrator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("provider {provider} failed: {message}")]
pub struct ProviderError {
    pub provider: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

// Errors surfaced to HTTP callers
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Rate limit exceeded. Try again later.")]
    RateLimited,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::RateLimited => "rate_limited",
            Self::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let Self::Internal { message } = &self {
            tracing::error!(error = %message, "request failed");
        }

        let body = serde_json::json!({
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::new("ollama", "connection refused");
        assert_eq!(err.to_string(), "provider ollama failed: connection refused");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GatewayError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(GatewayError::RateLimited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            GatewayError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message() {
        let err = GatewayError::validation("topic must not be empty");
        assert_eq!(err.to_string(), "Validation error: topic must not be empty");
    }
}
