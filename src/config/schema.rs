//! XSD schema configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// XSD schema configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaConfig {
    /// Path to the C1 XSD the service enforces
    #[serde(default = "default_xsd_path")]
    pub xsd_path: PathBuf,
}

impl SchemaConfig {
    /// Validate schema configuration
    ///
    /// The schema must exist at startup; a service that cannot validate
    /// anything should not come up.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.xsd_path.exists() {
            return Err(ValidationError::SchemaFileNotFound);
        }
        Ok(())
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            xsd_path: default_xsd_path(),
        }
    }
}

fn default_xsd_path() -> PathBuf {
    PathBuf::from("./schemas/c1.xsd")
}
