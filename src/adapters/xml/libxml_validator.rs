//! libxml implementation of the SchemaValidator port.
//!
//! The XSD is compiled per call. Documents are small and validation is far
//! from the hot path; recompiling keeps the adapter `Send + Sync` without
//! interior mutability around libxml's validation context, and picks up
//! schema file changes without a restart.

use std::path::{Path, PathBuf};

use libxml::{
    error::StructuredError,
    parser::Parser,
    schemas::{SchemaParserContext, SchemaValidationContext},
};

use crate::ports::{SchemaError, SchemaValidator};

/// XSD validation backed by libxml2.
#[derive(Debug, Clone)]
pub struct LibxmlSchemaValidator {
    xsd_path: PathBuf,
}

impl LibxmlSchemaValidator {
    /// Creates a validator for the schema at the given path.
    pub fn new(xsd_path: impl Into<PathBuf>) -> Self {
        Self {
            xsd_path: xsd_path.into(),
        }
    }

    /// The schema path this validator enforces.
    pub fn xsd_path(&self) -> &Path {
        &self.xsd_path
    }

    fn build_context(&self) -> Result<SchemaValidationContext, SchemaError> {
        // libxml errors out unhelpfully on a missing file; check first.
        if !self.xsd_path.exists() {
            return Err(SchemaError::unavailable(format!(
                "schema file not found: {}",
                self.xsd_path.display()
            )));
        }

        let xsd_path = self.xsd_path.to_str().ok_or_else(|| {
            SchemaError::unavailable(format!(
                "schema path is not valid UTF-8: {}",
                self.xsd_path.display()
            ))
        })?;

        let mut parser_ctx = SchemaParserContext::from_file(xsd_path);
        SchemaValidationContext::from_parser(&mut parser_ctx).map_err(|errors| {
            SchemaError::unavailable(format!(
                "schema failed to compile: {}",
                format_structured_errors(&errors).join("; ")
            ))
        })
    }
}

impl SchemaValidator for LibxmlSchemaValidator {
    fn validate(&self, xml: &str) -> Result<(), SchemaError> {
        let mut validation_ctx = self.build_context()?;

        let document = Parser::default()
            .parse_string(xml)
            .map_err(|e| SchemaError::malformed(format!("{e:?}")))?;

        validation_ctx
            .validate_document(&document)
            .map_err(|errors| SchemaError::Violations {
                messages: format_structured_errors(&errors),
            })
    }
}

fn format_structured_errors(errors: &[StructuredError]) -> Vec<String> {
    errors
        .iter()
        .map(|err| {
            let message = err
                .message
                .as_deref()
                .unwrap_or("unspecified schema error")
                .trim()
                .to_string();
            match err.line {
                Some(line) => format!("line {}: {}", line, message),
                None => message,
            }
        })
        .collect()
}
