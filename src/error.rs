//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the failure modes a request can hit: bad input, missing or bad
//! credentials, resources that are absent or not owned, and store failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly
//! convert application errors into HTTP responses with JSON bodies. `From`
//! implementations for `sqlx::Error`, `validator::ValidationErrors`, and
//! `bcrypt::BcryptError` allow easy conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur while serving a request.
///
/// Every failure is terminal for its request and scoped to it; no variant is
/// fatal to the process.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing input fields (HTTP 400).
    /// Carries field-level detail for the caller.
    Validation(String),
    /// Missing, malformed, invalid, or expired credentials (HTTP 401).
    Unauthenticated(String),
    /// The resource is absent or not owned by the caller (HTTP 404).
    ///
    /// The two cases are deliberately merged into one variant with one fixed
    /// message so responses never reveal whether a task exists.
    NotFoundOrDenied,
    /// Underlying persistence failure (HTTP 500).
    /// The detail is logged server-side; the response body stays generic.
    Store(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::NotFoundOrDenied => write!(f, "Not Found: task not found or access denied"),
            AppError::Store(msg) => write!(f, "Store Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate `AppError`
/// results from handlers into the correct HTTP status codes and JSON bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Unauthenticated(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFoundOrDenied => HttpResponse::NotFound().json(json!({
                "error": "task not found or access denied"
            })),
            // Store detail never reaches the client.
            AppError::Store(msg) => {
                log::error!("store error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `NotFoundOrDenied` since every task
/// query is already ownership-scoped; anything else is a store failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFoundOrDenied,
            _ => AppError::Store(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the per-field messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Store`.
///
/// Hashing failures are internal; the caller only ever sees a generic 500.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Store(error.to_string())
    }
}
