use crate::core::steps::AgentName;
use thiserror::Error;

/// Main error type for the planning pipeline
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// No credential is configured for the generation backend.
    #[error("Generation backend is not configured (no API key set)")]
    BackendUnavailable,

    #[error("Malformed response from {stage}: {detail}")]
    MalformedResponse { stage: AgentName, detail: String },

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AgentError>;

impl AgentError {
    /// Build a `MalformedResponse` for the given stage.
    pub fn malformed(stage: AgentName, detail: impl Into<String>) -> Self {
        AgentError::MalformedResponse {
            stage,
            detail: detail.into(),
        }
    }

    /// True for failures reported by (or on the way to) a configured backend.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            AgentError::Backend(_) | AgentError::Timeout(_) | AgentError::RateLimit { .. }
        )
    }

    /// The stage a malformed response came from, if any.
    pub fn stage(&self) -> Option<AgentName> {
        match self {
            AgentError::MalformedResponse { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AgentError::Config(_) => "CONFIG_ERROR",
            AgentError::BackendUnavailable => "BACKEND_UNAVAILABLE",
            AgentError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            AgentError::Backend(_) => "BACKEND_ERROR",
            AgentError::Serialization(_) => "SERIALIZATION_ERROR",
            AgentError::InvalidRequest(_) => "INVALID_REQUEST",
            AgentError::Timeout(_) => "TIMEOUT_ERROR",
            AgentError::RateLimit { .. } => "RATE_LIMIT_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "stage": self.stage().map(|stage| stage.as_str()),
            }
        })
    }
}
