//! Store error types.

use thiserror::Error;

/// SQLSTATE raised by `CREATE DATABASE` when the database already exists.
pub const DUPLICATE_DATABASE: &str = "42P04";

/// SQLSTATE for unique constraint violations.
pub const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE for foreign key violations.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Create database error: {0}")]
    CreateDatabase(#[source] sqlx::Error),

    #[error("Create tables error: {0}")]
    CreateTables(#[source] sqlx::Error),

    #[error("Invalid database name: {0}")]
    InvalidDatabaseName(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unique constraint violated: {}", .constraint.as_deref().unwrap_or("unknown"))]
    UniqueViolation { constraint: Option<String> },

    #[error("Foreign key constraint violated: {}", .constraint.as_deref().unwrap_or("unknown"))]
    ForeignKeyViolation { constraint: Option<String> },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, StoreError::ForeignKeyViolation { .. })
    }
}

/// Returns the SQLSTATE code carried by a database error, if any.
pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned())
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let constraint = err
            .as_database_error()
            .and_then(|db_err| db_err.constraint())
            .map(str::to_string);

        match sqlstate(&err).as_deref() {
            Some(UNIQUE_VIOLATION) => StoreError::UniqueViolation { constraint },
            Some(FOREIGN_KEY_VIOLATION) => StoreError::ForeignKeyViolation { constraint },
            _ => StoreError::Database(err),
        }
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        details.sort();

        StoreError::Validation(details.join("; "))
    }
}

impl From<validator::ValidationError> for StoreError {
    fn from(error: validator::ValidationError) -> Self {
        let message = error
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| error.code.to_string());
        StoreError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn test_non_database_error_is_generic() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }

    #[test]
    fn test_sqlstate_absent_for_non_database_error() {
        assert_eq!(sqlstate(&sqlx::Error::PoolClosed), None);
    }

    #[test]
    fn test_unique_violation_display() {
        let err = StoreError::UniqueViolation {
            constraint: Some("client_email_key".to_string()),
        };
        assert!(err.is_unique_violation());
        assert_eq!(
            err.to_string(),
            "Unique constraint violated: client_email_key"
        );
    }

    #[test]
    fn test_foreign_key_violation_display_without_constraint() {
        let err = StoreError::ForeignKeyViolation { constraint: None };
        assert!(err.is_foreign_key_violation());
        assert_eq!(err.to_string(), "Foreign key constraint violated: unknown");
    }

    #[test]
    fn test_setup_error_display() {
        let err = StoreError::CreateDatabase(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().starts_with("Create database error"));
    }

    #[test]
    fn test_from_validation_errors_sorted() {
        let mut errors = ValidationErrors::new();
        let mut name = ValidationError::new("length");
        name.message = Some("Name too long".into());
        errors.add("name", name);
        errors.add("email", ValidationError::new("length"));

        let err = StoreError::from(errors);
        assert_eq!(
            err.to_string(),
            "Validation error: email: length; name: Name too long"
        );
    }

    #[test]
    fn test_from_single_validation_error() {
        let mut error = ValidationError::new("phone_length");
        error.message = Some("Phone number must be at most 15 characters".into());
        let err = StoreError::from(error);
        assert!(matches!(err, StoreError::Validation(ref m) if m.contains("15 characters")));
    }
}
