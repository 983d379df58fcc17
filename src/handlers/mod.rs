//! HTTP request handlers for the metadata service.

pub mod auth;
pub mod openzgy;
pub mod segy;
pub mod status;

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::MetadataError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Handler error carrying a classified metadata error
#[derive(Debug)]
pub struct ApiError(pub MetadataError);

impl From<MetadataError> for ApiError {
    fn from(err: MetadataError) -> Self {
        ApiError(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(MetadataError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let class = self.0.classify();
        let status =
            StatusCode::from_u16(class.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), detail = %class.detail, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), detail = %class.detail, "Request rejected");
        }

        (status, Json(ErrorBody { detail: class.detail })).into_response()
    }
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            detail: "Not Found".to_string(),
        }),
    )
        .into_response()
}
