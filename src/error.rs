/// Error types for the blog service
///
/// Errors are converted to structured JSON responses for API clients.
/// Validation failures carry per-field messages so clients can highlight
/// the offending input.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Per-field validation messages, rendered under a `fields` key in the
/// error body, e.g. `{"fields": {"text": ["This field is required."]}}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ok when no messages were collected, otherwise a validation error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                fields.push(field.as_ref(), message);
            }
        }
        fields
    }
}

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Request body failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or invalid credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Validation error with a single field message.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(FieldErrors::single(field, message))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(fields) => serde_json::json!({
                "error": self.to_string(),
                "status": status.as_u16(),
                "fields": fields,
            }),
            _ => serde_json::json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            }),
        };

        HttpResponse::build(status).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.into())
    }
}

/// Translate a constraint violation raised by Postgres into the client
/// error the constraint exists to produce. Unrecognized constraints stay
/// database errors.
pub fn map_constraint_violation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some("follows_user_following_key") => {
                return AppError::field("following", "You are already following this user.");
            }
            Some("follows_no_self_follow") => {
                return AppError::field("following", "Following yourself is not allowed.");
            }
            Some("posts_group_id_fkey") => {
                return AppError::field("group", "Group does not exist.");
            }
            // The requester was deleted after their token was issued
            Some("posts_author_id_fkey")
            | Some("comments_author_id_fkey")
            | Some("follows_user_id_fkey") => {
                return AppError::Unauthorized("Requesting user no longer exists".to_string());
            }
            _ => {}
        }
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::field("text", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_field_errors_accumulate() {
        let mut fields = FieldErrors::new();
        assert!(fields.is_empty());
        assert!(fields.clone().into_result().is_ok());

        fields.push("text", "This field is required.");
        fields.push("text", "Second message");
        fields.push("group", "Group does not exist.");

        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["text"][0], "This field is required.");
        assert_eq!(value["text"][1], "Second message");
        assert_eq!(value["group"][0], "Group does not exist.");
        assert!(fields.into_result().is_err());
    }

    #[test]
    fn test_validation_error_body_shape() {
        let err = AppError::field("following", "Following yourself is not allowed.");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
