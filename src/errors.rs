use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::models::FieldError;

/// Application-specific error types.
#[derive(Debug, Clone)]
pub enum AppError {
    /// One or more request fields violated the consultation schema.
    /// Always maps to a client error, never a 5xx.
    Validation(Vec<FieldError>),
    /// The mail transport rejected or failed the send. The detail is logged
    /// for operators; callers only see a generic message.
    MailTransport(String),
    /// Any other failure during request handling.
    Internal(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                write!(f, "Validation failed on {} field(s)", errors.len())
            }
            AppError::MailTransport(msg) => write!(f, "Mail transport error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    /// Transport and internal details are logged but never leaked to the caller.
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(details) => {
                tracing::info!("Rejected consultation request: {} invalid field(s)", details.len());
                let body = Json(json!({
                    "error": "Invalid form data",
                    "details": details,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::MailTransport(msg) => {
                tracing::error!("Mail transport error: {}", msg);
                let body = Json(json!({
                    "error": "Failed to send consultation request",
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let body = Json(json!({
                    "error": "Internal server error",
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::WithContext { source, context } => {
                // Log full context chain, then delegate to the underlying error's response
                tracing::error!("Error with context: {} -> {}", context, source);
                source.into_response()
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::MailTransport(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;

    /// Add context lazily (only evaluated on error).
    #[allow(dead_code)]
    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, AppError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}
