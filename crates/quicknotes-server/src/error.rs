//! API error handling: maps failures onto HTTP status codes.
//!
//! | error                        | status |
//! |------------------------------|--------|
//! | `Validation`                 | 400    |
//! | `SummaryError::NotConfigured`| 400    |
//! | `SummaryError::Call`         | 500    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use quicknotes_providers::SummaryError;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad caller input.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_providers: Option<Vec<String>>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Summary(SummaryError::NotConfigured { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Summary(SummaryError::Call(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Validation(msg) => ErrorResponse {
                detail: msg.clone(),
                available_providers: None,
            },
            ApiError::Summary(e @ SummaryError::NotConfigured { available, .. }) => ErrorResponse {
                detail: e.to_string(),
                available_providers: Some(available.clone()),
            },
            ApiError::Summary(SummaryError::Call(e)) => ErrorResponse {
                detail: format!("AI Provider Error: {e}"),
                available_providers: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "summarize failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
