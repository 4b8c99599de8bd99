//! Application error types.
//!
//! Two externally observable kinds: validation failures (missing request
//! fields, rejected before any external call, 400) and upstream failures
//! (provisioning API or SQL execution, 500). Upstream messages are forwarded
//! verbatim; nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::ApiResponse;

/// Convenience alias used across all services.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is absent or empty.
    #[error("{0}")]
    Validation(String),

    /// The remote provisioning API call failed.
    #[error("{0}")]
    Provisioning(String),

    /// Opening a database connection failed.
    #[error("{0}")]
    DatabaseConnection(String),

    /// Executing a SQL statement failed.
    #[error("{0}")]
    DatabaseQuery(String),
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Provisioning(_)
            | AppError::DatabaseConnection(_)
            | AppError::DatabaseQuery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ApiResponse::err(self.to_string()))).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"))
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join(", "))
    }
}
