//! libxml implementation of the FieldExtractor port.

use libxml::{parser::Parser, tree::Document, xpath};

use crate::domain::validation::RawFields;
use crate::ports::{ExtractionError, FieldExtractor};

/// XPath field extraction backed by libxml2.
///
/// Elements are located by local name wherever they appear, ignoring
/// namespaces; C1 producers are inconsistent about both.
#[derive(Debug, Clone, Default)]
pub struct LibxmlFieldExtractor;

impl LibxmlFieldExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for LibxmlFieldExtractor {
    fn extract(&self, xml: &str) -> Result<RawFields, ExtractionError> {
        let document = Parser::default()
            .parse_string(xml)
            .map_err(|e| ExtractionError::malformed(format!("{e:?}")))?;

        let cups = field_text(&document, "CUPS")?;
        let request_date = field_text(&document, "FechaSolicitud")?;

        Ok(RawFields { cups, request_date })
    }
}

fn field_text(document: &Document, field: &'static str) -> Result<String, ExtractionError> {
    let ctx = xpath::Context::new(document)
        .map_err(|e| ExtractionError::malformed(format!("xpath context: {e:?}")))?;

    let expr = format!("//*[local-name()='{}']", field);
    let nodes = ctx
        .evaluate(&expr)
        .map_err(|e| ExtractionError::malformed(format!("xpath evaluation: {e:?}")))?
        .get_nodes_as_vec();

    let node = nodes
        .first()
        .ok_or(ExtractionError::MissingField { field })?;

    let value = node.get_content().trim().to_string();
    if value.is_empty() {
        return Err(ExtractionError::MissingField { field });
    }

    Ok(value)
}
