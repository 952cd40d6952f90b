//! Error handling for Stocky
//!
//! Every failure becomes a JSON body `{ "message": ..., "error": { "code": ..., "field": ... } }`.
//! Server-side failures are logged in full and reported generically.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::LedgerError;
use thiserror::Error;

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {message}")]
    Conflict { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn conflict(field: &str, message: impl Into<String>) -> Self {
        AppError::Conflict {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Map a unique-constraint violation to a conflict on `field`, pass anything else through
    pub fn on_unique_violation(field: &str, message: &str) -> impl FnOnce(sqlx::Error) -> AppError {
        Self::on_sqlstate(UNIQUE_VIOLATION, field, message)
    }

    /// Map a foreign-key violation (a row still referenced) to a conflict on `field`
    pub fn on_foreign_key_violation(
        field: &str,
        message: &str,
    ) -> impl FnOnce(sqlx::Error) -> AppError {
        Self::on_sqlstate(FOREIGN_KEY_VIOLATION, field, message)
    }

    fn on_sqlstate(
        sqlstate: &'static str,
        field: &str,
        message: &str,
    ) -> impl FnOnce(sqlx::Error) -> AppError {
        let field = field.to_string();
        let message = message.to_string();
        move |err| {
            let matches = err
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == sqlstate);
            if matches {
                AppError::Conflict { field, message }
            } else {
                AppError::DatabaseError(err)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AppError::Validation { .. } | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DatabaseError(_) | AppError::Internal(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                AppError::validation(field, message)
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NonPositiveQuantity(_) => AppError::validation("quantity", err.to_string()),
            LedgerError::InsufficientStock {
                available,
                requested,
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            LedgerError::StockOverflow => AppError::validation("quantity", err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>, field: Option<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(ErrorDetail {
                code: code.to_string(),
                field,
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::InvalidCredentials => {
                ErrorResponse::new("INVALID_CREDENTIALS", "Invalid username or password", None)
            }
            AppError::Unauthorized(message) => ErrorResponse::new("UNAUTHORIZED", message.clone(), None),
            AppError::InsufficientPermissions => ErrorResponse::new(
                "FORBIDDEN",
                "You do not have permission to perform this action",
                None,
            ),
            AppError::Validation { field, message } => {
                ErrorResponse::new("VALIDATION_ERROR", message.clone(), Some(field.clone()))
            }
            AppError::ValidationError(message) => {
                ErrorResponse::new("VALIDATION_ERROR", message.clone(), None)
            }
            AppError::Conflict { field, message } => {
                ErrorResponse::new("CONFLICT", message.clone(), Some(field.clone()))
            }
            AppError::NotFound(resource) => {
                ErrorResponse::new("NOT_FOUND", format!("{} not found", resource), None)
            }
            AppError::InsufficientStock {
                available,
                requested,
            } => ErrorResponse::new(
                "INSUFFICIENT_STOCK",
                format!(
                    "Insufficient stock: {} available, {} requested",
                    available, requested
                ),
                Some("quantity".to_string()),
            ),
            AppError::DatabaseError(_) => {
                ErrorResponse::new("DATABASE_ERROR", "A database error occurred", None)
            }
            AppError::Internal(_) | AppError::InternalError(_) => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal server error occurred", None)
            }
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::fmt;
    use sqlx::error::{DatabaseError, ErrorKind};
    use validator::Validate;

    #[derive(Debug)]
    struct PgError(&'static str);

    impl fmt::Display for PgError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "pg error {}", self.0)
        }
    }

    impl std::error::Error for PgError {}

    impl DatabaseError for PgError {
        fn message(&self) -> &str {
            "pg error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                FOREIGN_KEY_VIOLATION => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn pg_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgError(code)))
    }

    #[test]
    fn test_sqlstate_mapping() {
        let err = AppError::on_foreign_key_violation("category", "in use")(pg_error("23503"));
        assert!(matches!(err, AppError::Conflict { ref field, .. } if field == "category"));
        assert_eq!(err.status(), StatusCode::CONFLICT);

        let err = AppError::on_unique_violation("sku", "taken")(pg_error("23505"));
        assert!(matches!(err, AppError::Conflict { ref field, .. } if field == "sku"));

        // Only the named SQLSTATE is mapped
        let err = AppError::on_foreign_key_violation("category", "in use")(pg_error("23505"));
        assert!(matches!(err, AppError::DatabaseError(_)));

        let err = AppError::on_foreign_key_violation("category", "in use")(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InsufficientPermissions.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::validation("sku", "bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::conflict("sku", "taken").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound("Product".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InsufficientStock {
                available: 1,
                requested: 2
            }
            .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_ledger_errors_map_to_app_errors() {
        let err: AppError = LedgerError::InsufficientStock {
            available: 0,
            requested: 1,
        }
        .into();
        assert!(matches!(
            err,
            AppError::InsufficientStock {
                available: 0,
                requested: 1
            }
        ));

        let err: AppError = LedgerError::NonPositiveQuantity(0).into();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "quantity"));
    }

    #[test]
    fn test_validation_errors_report_first_field() {
        let input = shared::RegisterUser {
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
        };
        let err: AppError = input.validate().unwrap_err().into();
        match err {
            AppError::Validation { field, message } => {
                assert_eq!(field, "email");
                assert_eq!(message, "Invalid email format");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
