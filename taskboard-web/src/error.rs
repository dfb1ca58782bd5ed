/// Error handling for the web server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<T, WebError>`; expected failures on the auth
/// forms (validation, conflicts, bad credentials) are usually caught in
/// the handler and re-rendered inline instead, so the variants that reach
/// `IntoResponse` are mostly `NotFound` and `Internal`.
///
/// All of these errors are request-scoped: none of them takes the process
/// down.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handler result type alias
pub type WebResult<T> = Result<T, WebError>;

/// Unified request-scoped error type
#[derive(Debug)]
pub enum WebError {
    /// A required form field was missing or empty (422)
    Validation(Vec<FieldError>),

    /// Uniqueness violation, e.g. duplicate username or email (409)
    Conflict(String),

    /// Bad credentials (401)
    Authentication(String),

    /// Referenced resource does not exist (404)
    NotFound(String),

    /// Internal server error (500)
    Internal(String),
}

/// One field's validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            WebError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            WebError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            WebError::NotFound(msg) => write!(f, "Not found: {}", msg),
            WebError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for WebError {}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebError::Validation(errors) => {
                let joined = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                (StatusCode::UNPROCESSABLE_ENTITY, joined)
            }
            WebError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            WebError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
            WebError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            WebError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>{}</title></head>\
             <body><h1>{}</h1><p>{}</p></body></html>",
            status.as_u16(),
            status,
            message
        );

        (status, Html(body)).into_response()
    }
}

/// Convert sqlx errors to web errors
///
/// Unique-constraint violations surface as `Conflict` so the racy insert
/// path (two concurrent registrations of the same name) reports the same
/// thing the up-front duplicate probe does.
impl From<sqlx::Error> for WebError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => WebError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("username") || constraint.contains("email") {
                        return WebError::Conflict(
                            "Username or email already exists".to_string(),
                        );
                    }
                    return WebError::Conflict(format!("Constraint violation: {}", constraint));
                }
                WebError::Internal(format!("Database error: {}", db_err))
            }
            _ => WebError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password hashing errors to web errors
impl From<taskboard_shared::auth::password::PasswordError> for WebError {
    fn from(err: taskboard_shared::auth::password::PasswordError) -> Self {
        WebError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert template rendering errors to web errors
impl From<minijinja::Error> for WebError {
    fn from(err: minijinja::Error) -> Self {
        WebError::Internal(format!("Template rendering failed: {}", err))
    }
}

/// Convert validator output to web errors
impl From<validator::ValidationErrors> for WebError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        WebError::Validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WebError::NotFound("No task with id 999".to_string());
        assert_eq!(err.to_string(), "Not found: No task with id 999");

        let err = WebError::Authentication("Wrong credentials".to_string());
        assert_eq!(err.to_string(), "Authentication failed: Wrong credentials");
    }

    #[test]
    fn test_validation_error_display() {
        let err = WebError::Validation(vec![
            FieldError {
                field: "username".to_string(),
                message: "Username is required".to_string(),
            },
            FieldError {
                field: "password".to_string(),
                message: "Password is required".to_string(),
            },
        ]);

        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_conflict_maps_to_same_message_as_probe() {
        // The message must match the one used by the duplicate probe so
        // both code paths look identical to the client
        let err = WebError::Conflict("Username or email already exists".to_string());
        assert!(err.to_string().contains("Username or email already exists"));
    }
}
