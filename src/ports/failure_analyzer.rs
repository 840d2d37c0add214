//! Failure Analyzer Port - LLM-backed explanation of validation failures.
//!
//! Abstracts the language model that turns a validation failure into a
//! short human-readable diagnosis. Analyzer failures never fail a request;
//! callers degrade to a fixed fallback text.

use async_trait::async_trait;
use thiserror::Error;

/// Port for requesting a failure explanation from a language model.
#[async_trait]
pub trait FailureAnalyzer: Send + Sync {
    /// Asks for a short explanation of why the document was rejected.
    async fn explain(&self, request: AnalysisRequest) -> Result<String, AnalysisError>;
}

/// Input for a failure analysis.
///
/// Carries only the domain facts; provider context (the schema text, the
/// prompt wording) belongs to the adapter.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// The offending document, as received.
    pub xml: String,
    /// The pipeline's diagnostic detail.
    pub error_detail: String,
}

impl AnalysisRequest {
    /// Creates a new analysis request.
    pub fn new(xml: impl Into<String>, error_detail: impl Into<String>) -> Self {
        Self {
            xml: xml.into(),
            error_detail: error_detail.into(),
        }
    }
}

/// Analyzer errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AnalysisError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Short kind label, used in degraded fallback messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::RateLimited { .. } => "rate limited",
            AnalysisError::AuthenticationFailed => "authentication failed",
            AnalysisError::Unavailable { .. } => "provider unavailable",
            AnalysisError::Network(_) => "network error",
            AnalysisError::Parse(_) => "parse error",
            AnalysisError::InvalidRequest(_) => "invalid request",
            AnalysisError::Timeout { .. } => "timeout",
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AnalysisError::RateLimited { .. }
                | AnalysisError::Unavailable { .. }
                | AnalysisError::Network(_)
                | AnalysisError::Timeout { .. }
        )
    }
}
