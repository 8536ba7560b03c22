//! API error type and its wire mapping.
//!
//! Validation failures answer 400 with the bare field → messages mapping
//! as the body; lookup failures answer 404 with `{"detail": ...}`; store
//! failures answer 500 with `{"detail": ...}` and are logged.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use vps_core::FieldErrors;
use vps_state::StoreError;

/// Detail message for lookups that found no record.
pub const NOT_FOUND_DETAIL: &str = "No server found for the given ID.";

/// Errors surfaced by the API layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::NotFound(NOT_FOUND_DETAIL)
    }
}

/// `{"detail": ...}` body for non-field errors.
#[derive(Serialize)]
struct Detail {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                Json(Detail {
                    detail: detail.to_string(),
                }),
            )
                .into_response(),
            ApiError::Store(e) => {
                error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Detail {
                        detail: e.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
