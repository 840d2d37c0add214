//! Schema Validator Port - XSD conformance checking interface.
//!
//! The pipeline depends on this trait; the libxml adapter provides the
//! implementation. Validation is synchronous: documents are small and the
//! schema is local.

use thiserror::Error;

/// Port for checking a document against the configured XSD.
///
/// # Contract
///
/// Implementations must:
/// - Distinguish a document that cannot be parsed (`Malformed`) from one
///   that parses but violates the schema (`Violations`)
/// - Collect ALL schema violations, not just the first
/// - Report an unloadable or uncompilable XSD as `SchemaUnavailable`, never
///   as a document failure
pub trait SchemaValidator: Send + Sync {
    /// Validates the document, returning `Ok(())` when it conforms.
    fn validate(&self, xml: &str) -> Result<(), SchemaError>;
}

/// Errors that can occur during schema validation.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// The document is not well-formed XML.
    #[error("malformed XML: {detail}")]
    Malformed { detail: String },

    /// The document violates the schema.
    #[error("{} schema violation(s)", messages.len())]
    Violations { messages: Vec<String> },

    /// The XSD itself could not be loaded or compiled.
    ///
    /// This is an operator problem, not a client one, and must surface as
    /// an internal error rather than a rejection.
    #[error("schema unavailable: {detail}")]
    SchemaUnavailable { detail: String },
}

impl SchemaError {
    /// Creates a malformed-document error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        SchemaError::Malformed {
            detail: detail.into(),
        }
    }

    /// Creates a schema-unavailable error.
    pub fn unavailable(detail: impl Into<String>) -> Self {
        SchemaError::SchemaUnavailable {
            detail: detail.into(),
        }
    }

    /// Returns true when the failure is the operator's, not the client's.
    pub fn is_operational(&self) -> bool {
        matches!(self, SchemaError::SchemaUnavailable { .. })
    }
}
