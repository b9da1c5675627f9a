//! Request-boundary error handling.
//!
//! Every failure is recovered here and rendered as the uniform envelope
//! `{success: false, message, errors}` with an appropriate status code;
//! nothing crashes the process.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use jobboard_core::error::RepoError;
use jobboard_core::ports::AuthError;
use jobboard_shared::Envelope;

/// Application-level error taxonomy.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Unknown email and wrong password render identically, so responses
    /// cannot be used to enumerate accounts.
    InvalidCredentials,
    EmailNotVerified,
    Unauthorized,
    Forbidden(String),
    Conflict(String),
    InvalidTransition(String),
    UnsupportedMediaType(String),
    Validation(Vec<String>),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::EmailNotVerified => write!(f, "Email not verified"),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::InvalidTransition(msg) => write!(f, "Invalid transition: {msg}"),
            AppError::UnsupportedMediaType(msg) => write!(f, "Unsupported media type: {msg}"),
            AppError::Validation(errors) => write!(f, "Validation errors: {errors:?}"),
            AppError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::EmailNotVerified => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidTransition(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let envelope: Envelope<serde_json::Value> = match self {
            AppError::NotFound(msg) => Envelope::fail(msg.clone(), vec!["Not found".to_string()]),
            AppError::BadRequest(msg) => {
                Envelope::fail(msg.clone(), vec!["Bad request".to_string()])
            }
            AppError::InvalidCredentials => Envelope::fail(
                "Invalid credentials",
                vec!["Invalid email/password".to_string()],
            ),
            AppError::EmailNotVerified => Envelope::fail(
                "Email not verified",
                vec!["Verify your email before logging in".to_string()],
            ),
            AppError::Unauthorized => Envelope::fail(
                "Invalid or expired token",
                vec!["Unauthorized".to_string()],
            ),
            AppError::Forbidden(msg) => Envelope::fail(msg.clone(), vec!["Forbidden".to_string()]),
            AppError::Conflict(msg) => Envelope::fail(msg.clone(), vec!["Conflict".to_string()]),
            AppError::InvalidTransition(msg) => Envelope::fail(
                "Invalid status transition (cannot go backwards)",
                vec![msg.clone()],
            ),
            AppError::UnsupportedMediaType(mime) => {
                Envelope::fail("Unsupported file type", vec![format!("Got {mime}")])
            }
            AppError::Validation(errors) => {
                Envelope::fail("Validation failed", errors.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                Envelope::fail(
                    "Internal server error",
                    vec!["Internal server error".to_string()],
                )
            }
        };

        HttpResponse::build(self.status_code()).json(envelope)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::UniqueViolation(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {msg}");
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {msg}");
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::TokenExpired | AuthError::MissingAuth | AuthError::InvalidToken(_) => {
                AppError::Unauthorized
            }
            AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
