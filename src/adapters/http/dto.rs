//! Request/response DTOs for the validation endpoint.

use serde::{Deserialize, Serialize};

use crate::application::ValidationOutcome;

/// Response body for the validate endpoint, accepted or rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Audit id of the attempt.
    pub request_id: String,
    /// True when the document was accepted.
    pub ok: bool,
    /// `OK`, `XSD_INVALID` or `CONTENT_INVALID`.
    pub error_code: String,
    /// Client-facing summary, rejections only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// AI explanation (or degradation notice), rejections only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<String>,
}

impl From<ValidationOutcome> for ValidateResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            request_id: outcome.attempt_id.to_string(),
            ok: outcome.accepted,
            error_code: outcome.wire_code.to_string(),
            message: outcome.message,
            ai: outcome.ai_analysis,
        }
    }
}

/// Generic error body for auth, upload and internal failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AttemptId;

    #[test]
    fn accepted_outcome_serializes_without_optional_fields() {
        let response = ValidateResponse::from(ValidationOutcome {
            attempt_id: AttemptId::new(),
            accepted: true,
            wire_code: "OK",
            message: None,
            ai_analysis: None,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["error_code"], "OK");
        assert!(json.get("message").is_none());
        assert!(json.get("ai").is_none());
    }

    #[test]
    fn rejected_outcome_serializes_message_and_ai() {
        let id = AttemptId::new();
        let response = ValidateResponse::from(ValidationOutcome {
            attempt_id: id,
            accepted: false,
            wire_code: "CONTENT_INVALID",
            message: Some("The content does not satisfy the C1 business rules.".to_string()),
            ai_analysis: Some("- the date is in the past".to_string()),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["request_id"], id.to_string());
        assert_eq!(json["ok"], false);
        assert_eq!(json["error_code"], "CONTENT_INVALID");
        assert_eq!(json["ai"], "- the date is in the past");
    }
}
