//! HTTP routes for the validation endpoint.

use axum::{middleware, routing::post, Router};

use super::handlers::{validate_c1, ValidationHandlers};
use super::middleware::{auth_middleware, AuthState};

/// Creates the API router with origin authentication applied.
pub fn api_router(handlers: ValidationHandlers, authenticator: AuthState) -> Router {
    Router::new()
        .route("/c1/validate", post(validate_c1))
        .layer(middleware::from_fn_with_state(
            authenticator,
            auth_middleware,
        ))
        .with_state(handlers)
}
