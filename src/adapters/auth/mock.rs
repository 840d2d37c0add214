//! Mock origin authenticator for testing.

use crate::ports::{AuthError, OriginAuthenticator};

/// Test double that accepts exactly the tokens it was told to.
#[derive(Debug, Clone, Default)]
pub struct MockAuthenticator {
    accepted: Vec<String>,
}

impl MockAuthenticator {
    /// Creates an authenticator that rejects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts the given token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.accepted.push(token.into());
        self
    }
}

impl OriginAuthenticator for MockAuthenticator {
    fn verify(&self, token: &str) -> Result<(), AuthError> {
        if self.accepted.iter().any(|t| t == token) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}
