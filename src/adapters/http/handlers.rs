//! HTTP handlers for the validation endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::ValidateC1Handler;
use crate::domain::foundation::{DomainError, ErrorCode};

use super::dto::{ErrorResponse, ValidateResponse};

/// Handler state for the validation routes.
#[derive(Clone)]
pub struct ValidationHandlers {
    validate_handler: Arc<ValidateC1Handler>,
}

impl ValidationHandlers {
    pub fn new(validate_handler: Arc<ValidateC1Handler>) -> Self {
        Self { validate_handler }
    }
}

/// POST /c1/validate - Validate an uploaded C1 document
///
/// Expects a multipart body with the document under the `file` field. The
/// upload is decoded as UTF-8 lossily; the pipeline sees exactly what will
/// be audited.
pub async fn validate_c1(
    State(handlers): State<ValidationHandlers>,
    multipart: Multipart,
) -> Response {
    let xml = match read_file_field(multipart).await {
        Ok(xml) => xml,
        Err(response) => return response,
    };

    match handlers.validate_handler.handle(xml).await {
        Ok(outcome) => {
            let status = if outcome.accepted {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, Json(ValidateResponse::from(outcome))).into_response()
        }
        Err(e) => handle_internal_error(e),
    }
}

/// Pulls the `file` field out of the multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<String, Response> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let bytes = field.bytes().await.map_err(|e| {
                    upload_error(format!("Failed to read upload: {}", e))
                })?;
                return Ok(String::from_utf8_lossy(&bytes).into_owned());
            }
            Ok(None) => {
                return Err(upload_error("Multipart field 'file' is required"));
            }
            Err(e) => {
                return Err(upload_error(format!("Invalid multipart body: {}", e)));
            }
        }
    }
}

fn upload_error(message: impl Into<String>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse::new(message, "INVALID_UPLOAD")),
    )
        .into_response()
}

fn handle_internal_error(e: DomainError) -> Response {
    tracing::error!(code = %e.code, error = %e, "validation request failed");

    let code = match e.code {
        ErrorCode::SchemaUnavailable => ErrorCode::SchemaUnavailable,
        ErrorCode::DatabaseError => ErrorCode::DatabaseError,
        _ => ErrorCode::InternalError,
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error", code.to_string())),
    )
        .into_response()
}
