//! The pipeline failure taxonomy.
//!
//! Every way a C1 request can be rejected is a variant here, and every
//! variant maps to exactly one pipeline stage and one wire-level rejection
//! code. The detailed messages feed the audit record and the AI analyzer;
//! `wire_code` is what clients key their handling on.

use chrono::NaiveDate;
use thiserror::Error;

/// The ordered stages of the validation pipeline.
///
/// Origin is enforced by the HTTP middleware before a document reaches the
/// pipeline; rejected requests never produce a [`ValidationFailure`], so
/// only the Schema and Content stages appear in the failure mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationStage {
    /// Bearer-token origin check.
    Origin,
    /// Well-formedness and XSD conformance.
    Schema,
    /// Field extraction and business rules.
    Content,
}

/// A business rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("invalid CUPS format (expected ES + 18 uppercase alphanumerics): '{value}'")]
    InvalidCups { value: String },

    #[error("FechaSolicitud is not an ISO calendar date: '{value}'")]
    UnparseableDate { value: String },

    #[error("FechaSolicitud {date} is in the past (today is {today})")]
    DateInPast { date: NaiveDate, today: NaiveDate },
}

/// A validation pipeline rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// The document is not well-formed XML.
    #[error("malformed XML: {detail}")]
    MalformedXml { detail: String },

    /// The document is well-formed but violates the XSD.
    #[error("XSD violations: {}", messages.join("; "))]
    SchemaViolations { messages: Vec<String> },

    /// A required business field is absent from the document.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// A business rule failed on an extracted field.
    #[error(transparent)]
    Rule(#[from] RuleViolation),
}

impl ValidationFailure {
    /// The pipeline stage this failure belongs to.
    pub fn stage(&self) -> ValidationStage {
        match self {
            ValidationFailure::MalformedXml { .. } | ValidationFailure::SchemaViolations { .. } => {
                ValidationStage::Schema
            }
            ValidationFailure::MissingField { .. } | ValidationFailure::Rule(_) => {
                ValidationStage::Content
            }
        }
    }

    /// The wire-level rejection code for this failure.
    pub fn wire_code(&self) -> &'static str {
        match self {
            ValidationFailure::MalformedXml { .. } | ValidationFailure::SchemaViolations { .. } => {
                "XSD_INVALID"
            }
            ValidationFailure::MissingField { .. } | ValidationFailure::Rule(_) => {
                "CONTENT_INVALID"
            }
        }
    }

    /// Short client-facing summary, without diagnostic internals.
    pub fn summary(&self) -> &'static str {
        match self {
            ValidationFailure::MalformedXml { .. } | ValidationFailure::SchemaViolations { .. } => {
                "The XML does not conform to the C1 schema."
            }
            ValidationFailure::MissingField { .. } | ValidationFailure::Rule(_) => {
                "The content does not satisfy the C1 business rules."
            }
        }
    }

    /// Full diagnostic detail, for the audit record and the AI analyzer.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    #[test]
    fn malformed_xml_is_schema_stage() {
        let failure = ValidationFailure::MalformedXml {
            detail: "unexpected EOF".to_string(),
        };
        assert_eq!(failure.stage(), ValidationStage::Schema);
        assert_eq!(failure.wire_code(), "XSD_INVALID");
    }

    #[test]
    fn schema_violations_join_messages() {
        let failure = ValidationFailure::SchemaViolations {
            messages: vec!["missing CUPS".to_string(), "bad date type".to_string()],
        };
        assert_eq!(failure.wire_code(), "XSD_INVALID");
        assert_eq!(
            failure.detail(),
            "XSD violations: missing CUPS; bad date type"
        );
    }

    #[test]
    fn missing_field_is_content_stage() {
        let failure = ValidationFailure::MissingField { field: "CUPS" };
        assert_eq!(failure.stage(), ValidationStage::Content);
        assert_eq!(failure.wire_code(), "CONTENT_INVALID");
    }

    #[test]
    fn rule_violations_are_content_stage() {
        let failure = ValidationFailure::Rule(RuleViolation::DateInPast {
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            today: sample_date(),
        });
        assert_eq!(failure.stage(), ValidationStage::Content);
        assert_eq!(failure.wire_code(), "CONTENT_INVALID");
    }

    #[test]
    fn rule_violation_converts_into_failure() {
        let violation = RuleViolation::InvalidCups {
            value: "nope".to_string(),
        };
        let failure: ValidationFailure = violation.into();
        assert!(matches!(failure, ValidationFailure::Rule(_)));
    }

    #[test]
    fn detail_carries_the_offending_value() {
        let failure = ValidationFailure::Rule(RuleViolation::UnparseableDate {
            value: "08/08/2026".to_string(),
        });
        assert!(failure.detail().contains("08/08/2026"));
    }

    #[test]
    fn summaries_do_not_leak_internals() {
        let failure = ValidationFailure::MalformedXml {
            detail: "parser said: <secret>".to_string(),
        };
        assert!(!failure.summary().contains("secret"));
    }
}
