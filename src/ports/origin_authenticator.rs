//! Origin Authenticator Port - bearer-token origin checking.
//!
//! Keeps the HTTP middleware provider-agnostic: whether the check is a
//! static token, an OIDC introspection, or a test mock, the middleware
//! doesn't change.

use thiserror::Error;

/// Port for authenticating the origin of a request.
pub trait OriginAuthenticator: Send + Sync {
    /// Verifies a bearer token, returning `Ok(())` when the origin is
    /// trusted.
    fn verify(&self, token: &str) -> Result<(), AuthError>;
}

/// Origin authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The presented token does not match any trusted origin.
    #[error("invalid token")]
    InvalidToken,
}
