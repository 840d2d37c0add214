//! Origin authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum token length enforced outside development.
const MIN_TOKEN_LENGTH: usize = 16;

/// Origin authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// The API bearer token trusted origins present
    pub api_token: Secret<String>,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Development tolerates short tokens (`dev-token` style); staging and
    /// production require at least [`MIN_TOKEN_LENGTH`] characters.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let token = self.api_token.expose_secret();
        if token.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__API_TOKEN"));
        }
        if *environment != Environment::Development && token.len() < MIN_TOKEN_LENGTH {
            return Err(ValidationError::TokenTooShort);
        }
        Ok(())
    }
}
