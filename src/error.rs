//! Error types for the Libris server

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Stable error codes reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchPatron = 4,
    NoSuchBook = 5,
    BookNotAvailable = 7,
    BadValue = 18,
    NotBorrowed = 22,
    BookOnLoan = 23,
}

/// How a caller should present an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The operation succeeded
    Info,
    /// Recoverable: the request was well formed but the state did not allow it
    Warning,
    /// Malformed input or a storage fault
    Error,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Book {0} is not available")]
    NotAvailable(i64),

    #[error("Patron '{patron}' has not borrowed book {book_id}")]
    NotBorrowed { patron: String, book_id: i64 },

    #[error("Patron '{0}' has no borrowed books")]
    NoSuchPatron(String),

    #[error("Book {0} is on loan and cannot be deleted")]
    BookOnLoan(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NoSuchBook,
            AppError::NotAvailable(_) => ErrorCode::BookNotAvailable,
            AppError::NotBorrowed { .. } => ErrorCode::NotBorrowed,
            AppError::NoSuchPatron(_) => ErrorCode::NoSuchPatron,
            AppError::BookOnLoan(_) => ErrorCode::BookOnLoan,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Database(_) | AppError::Migration(_) => ErrorCode::DbFailure,
            AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            AppError::NotFound(_)
            | AppError::NotAvailable(_)
            | AppError::NotBorrowed { .. }
            | AppError::NoSuchPatron(_)
            | AppError::BookOnLoan(_) => Severity::Warning,
            AppError::Validation(_)
            | AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Internal(_) => Severity::Error,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::NoSuchPatron(_) => StatusCode::NOT_FOUND,
            AppError::NotAvailable(_) | AppError::BookOnLoan(_) => StatusCode::CONFLICT,
            AppError::NotBorrowed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Migration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub severity: Severity,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let code = self.code();
        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            severity: self.severity(),
            message,
        });

        (self.status(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
