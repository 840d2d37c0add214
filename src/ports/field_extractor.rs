//! Field Extractor Port - lifting business fields out of the document.

use thiserror::Error;

use crate::domain::validation::RawFields;

/// Port for extracting the validated business fields from a C1 document.
///
/// Lookup is by local element name, ignoring namespaces; extracted text is
/// trimmed. The extractor runs only after schema validation has passed, but
/// implementations must still handle unparseable input defensively.
pub trait FieldExtractor: Send + Sync {
    /// Extracts the raw CUPS and FechaSolicitud field text.
    fn extract(&self, xml: &str) -> Result<RawFields, ExtractionError>;
}

/// Errors that can occur during field extraction.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// The document could not be parsed.
    #[error("malformed XML: {detail}")]
    Malformed { detail: String },

    /// A required field element is absent or empty.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
}

impl ExtractionError {
    /// Creates a malformed-document error.
    pub fn malformed(detail: impl Into<String>) -> Self {
        ExtractionError::Malformed {
            detail: detail.into(),
        }
    }
}
