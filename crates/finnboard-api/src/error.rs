//! Error types for finnboard-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use finnboard_core::{CoreError, ErrorSeverity};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Core(CoreError::TransactionNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::NotLoaded) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for the JSON body
    pub fn code(&self) -> String {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND".to_string(),
            ApiError::BadRequest { .. } => "BAD_REQUEST".to_string(),
            ApiError::Internal { .. } => "INTERNAL".to_string(),
            ApiError::Core(err) => err.code().to_string(),
        }
    }

    fn log(&self) {
        let severity = match self {
            ApiError::Core(err) => err.severity(),
            ApiError::Internal { .. } => ErrorSeverity::Error,
            _ => ErrorSeverity::Info,
        };
        match severity {
            ErrorSeverity::Error => log::error!("{}", self),
            ErrorSeverity::Warning => log::warn!("{}", self),
            ErrorSeverity::Info => log::debug!("{}", self),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let body = match &self {
            ApiError::Core(err) => {
                let details = err.to_details();
                serde_json::json!({
                    "error": details.code,
                    "message": details.message,
                    "severity": details.severity,
                    "suggestions": details.suggestions,
                })
            }
            other => serde_json::json!({
                "error": other.code(),
                "message": other.to_string(),
            }),
        };
        (self.status(), axum::Json(body)).into_response()
    }
}
