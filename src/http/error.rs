//! Request-scoped errors and their HTTP mapping.
//!
//! Nothing a request does can stop the process: every failure in a handler
//! ends up here and becomes a response.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::network::InvalidParameter;
use crate::render::TemplateError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to serialize config: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("404 page not found")]
    NotFound,

    /// Path matched a route but a parameter is unusable.
    #[error("404 page not found")]
    InvalidParameter(#[from] InvalidParameter),

    /// Path matched a route but its parameters could not be extracted.
    #[error("404 page not found")]
    InvalidPath(#[from] PathRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Template(_) | ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound | ApiError::InvalidParameter(_) | ApiError::InvalidPath(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else if let Some(reason) = std::error::Error::source(&self) {
            tracing::debug!(reason = %reason, "Rejected request parameters");
        }
        (status, format!("{}\n", self)).into_response()
    }
}
