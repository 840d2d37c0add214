//! Static bearer token implementation of OriginAuthenticator.

use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::ports::{AuthError, OriginAuthenticator};

/// Origin authentication against one configured API token.
///
/// Comparison is constant-time over the token bytes; only the length check
/// can short-circuit.
pub struct StaticTokenAuthenticator {
    token: Secret<String>,
}

impl StaticTokenAuthenticator {
    /// Creates an authenticator for the given token.
    pub fn new(token: Secret<String>) -> Self {
        Self { token }
    }
}

impl OriginAuthenticator for StaticTokenAuthenticator {
    fn verify(&self, token: &str) -> Result<(), AuthError> {
        let expected = self.token.expose_secret().as_bytes();
        let presented = token.as_bytes();

        if expected.len() != presented.len() {
            return Err(AuthError::InvalidToken);
        }

        if bool::from(expected.ct_eq(presented)) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}
