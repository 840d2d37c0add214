//! The C1 validation pipeline.
//!
//! Runs the ordered stages over a received document and short-circuits on
//! the first failure: a document that fails the schema stage is never
//! extracted, and a document missing a field is never rule-checked. Origin
//! authentication happens upstream in the HTTP middleware; by the time a
//! document reaches the pipeline its origin is trusted.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::validation::{C1Request, ValidationFailure, ValidationStage};
use crate::ports::{ExtractionError, FieldExtractor, SchemaError, SchemaValidator};

/// The pipeline's answer for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineVerdict {
    /// Every stage passed; the typed request exists.
    Accepted(C1Request),
    /// A stage failed; later stages were not run.
    Rejected(ValidationFailure),
}

impl PipelineVerdict {
    /// Returns true when the document was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, PipelineVerdict::Accepted(_))
    }

    /// Audit flags `(schema_valid, content_valid)` for this verdict.
    ///
    /// A schema-stage rejection marks content invalid as well: content that
    /// was never evaluated is not acceptable content.
    pub fn audit_flags(&self) -> (bool, bool) {
        match self {
            PipelineVerdict::Accepted(_) => (true, true),
            PipelineVerdict::Rejected(failure) => match failure.stage() {
                ValidationStage::Content => (true, false),
                _ => (false, false),
            },
        }
    }
}

/// Ordered, short-circuiting validation of C1 documents.
pub struct ValidationPipeline {
    schema_validator: Arc<dyn SchemaValidator>,
    extractor: Arc<dyn FieldExtractor>,
}

impl ValidationPipeline {
    /// Creates a pipeline over the given validator and extractor.
    pub fn new(
        schema_validator: Arc<dyn SchemaValidator>,
        extractor: Arc<dyn FieldExtractor>,
    ) -> Self {
        Self {
            schema_validator,
            extractor,
        }
    }

    /// Runs the stages in order against the reference date.
    ///
    /// Returns `Err` only when the pipeline itself cannot run (the XSD is
    /// unavailable); every client-attributable problem is a
    /// [`PipelineVerdict::Rejected`].
    pub fn run(&self, xml: &str, today: NaiveDate) -> Result<PipelineVerdict, DomainError> {
        // Stage: well-formedness and XSD conformance
        if let Err(err) = self.schema_validator.validate(xml) {
            let failure = match err {
                SchemaError::Malformed { detail } => ValidationFailure::MalformedXml { detail },
                SchemaError::Violations { messages } => {
                    ValidationFailure::SchemaViolations { messages }
                }
                SchemaError::SchemaUnavailable { detail } => {
                    return Err(DomainError::new(ErrorCode::SchemaUnavailable, detail));
                }
            };
            return Ok(PipelineVerdict::Rejected(failure));
        }

        // Stage: field extraction
        let raw = match self.extractor.extract(xml) {
            Ok(raw) => raw,
            Err(ExtractionError::Malformed { detail }) => {
                return Ok(PipelineVerdict::Rejected(ValidationFailure::MalformedXml {
                    detail,
                }));
            }
            Err(ExtractionError::MissingField { field }) => {
                return Ok(PipelineVerdict::Rejected(ValidationFailure::MissingField {
                    field,
                }));
            }
        };

        // Stage: business rules
        match C1Request::from_raw(&raw, today) {
            Ok(request) => Ok(PipelineVerdict::Accepted(request)),
            Err(violation) => Ok(PipelineVerdict::Rejected(violation.into())),
        }
    }
}
