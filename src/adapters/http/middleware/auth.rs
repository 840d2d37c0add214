//! Authentication middleware for axum.
//!
//! Validates the Bearer token on every request before a document is read.
//! The middleware uses the `OriginAuthenticator` port, so whether the check
//! is a static token or a test mock, the middleware doesn't change.
//!
//! # Token Extraction
//!
//! Expects the token in the `Authorization` header with `Bearer` prefix:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! Missing and invalid tokens are both answered with 401; the origin check
//! is one stage with one failure mode.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::OriginAuthenticator;

/// Auth middleware state - wraps the origin authenticator.
pub type AuthState = Arc<dyn OriginAuthenticator>;

/// Origin authentication middleware.
pub async fn auth_middleware(
    State(authenticator): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) if authenticator.verify(token).is_ok() => next.run(request).await,
        Some(_) => unauthorized("Invalid bearer token"),
        None => unauthorized("Bearer token required"),
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": message,
            "code": "UNAUTHORIZED"
        })),
    )
        .into_response()
}
