//! Error types for recipebox.
//!
//! This module defines all error types used throughout the recipebox crate.
//! Storage failures carry the storage key and the backend cause; import
//! failures deliberately collapse into a single user-facing message.

use std::path::PathBuf;
use thiserror::Error;

use crate::recipe::ValidationError;

/// The main error type for recipebox operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Recipe Store Errors ===
    /// Reading or decoding the recipe collection failed.
    #[error("failed to load recipes from '{key}': {source}")]
    StorageRead {
        /// Storage key that was being read.
        key: String,
        /// The underlying backend or decoding error.
        #[source]
        source: BackendError,
    },

    /// Encoding or writing the recipe collection failed.
    #[error("failed to save recipes to '{key}': {source}")]
    StorageWrite {
        /// Storage key that was being written.
        key: String,
        /// The underlying backend or encoding error.
        #[source]
        source: BackendError,
    },

    /// An update targeted a recipe id that is not stored.
    #[error("recipe not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    // === Import Errors ===
    /// The import payload was not valid JSON or did not have the recipe shape.
    #[error("Failed to parse JSON recipe")]
    Import,

    // === Validation Errors ===
    /// Recipe form input is incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // === Database Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database statement failed outside a recipe store operation.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by a key-value backend, or while (de)serializing the
/// collection that travels through it.
#[derive(Error, Debug)]
pub enum BackendError {
    /// A `SQLite` statement failed.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The stored text was not a valid recipe collection, or could not be encoded.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A specialized Result type for recipebox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a storage read error for the given key.
    #[must_use]
    pub fn storage_read(key: impl Into<String>, source: impl Into<BackendError>) -> Self {
        Self::StorageRead {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Create a storage write error for the given key.
    #[must_use]
    pub fn storage_write(key: impl Into<String>, source: impl Into<BackendError>) -> Self {
        Self::StorageWrite {
            key: key.into(),
            source: source.into(),
        }
    }

    /// Create a not-found error for the given recipe id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Check if this error means the targeted recipe does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl BackendError {
    /// Create an unavailable-backend error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_display() {
        assert_eq!(Error::Import.to_string(), "Failed to parse JSON recipe");
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("1700000000000");
        assert_eq!(err.to_string(), "recipe not found: 1700000000000");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_storage_read_display() {
        let err = Error::storage_read("recipes", BackendError::unavailable("disk gone"));
        let msg = err.to_string();
        assert!(msg.contains("recipes"));
        assert!(msg.contains("disk gone"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_storage_write_from_sqlite() {
        let sqlite_err = rusqlite::Error::QueryReturnedNoRows;
        let err = Error::storage_write("recipes", sqlite_err);
        assert!(matches!(
            err,
            Error::StorageWrite {
                source: BackendError::Sqlite(_),
                ..
            }
        ));
        assert!(err.to_string().starts_with("failed to save recipes to 'recipes': sqlite:"));
    }

    #[test]
    fn test_storage_read_from_json() {
        let json_err = serde_json::from_str::<Vec<i32>>("{").unwrap_err();
        let err = Error::storage_read("recipes", json_err);
        assert!(matches!(
            err,
            Error::StorageRead {
                source: BackendError::Json(_),
                ..
            }
        ));
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: Error = ValidationError::MissingTitle.into();
        assert_eq!(err.to_string(), "Please enter a recipe title");
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "storage.key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("storage.key"));
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }

    #[test]
    fn test_database_open_error_display() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err = Error::DatabaseOpen {
                path: PathBuf::from("/nonexistent/path/db.sqlite"),
                source: sqlite_err,
            };
            assert!(err.to_string().contains("/nonexistent/path/db.sqlite"));
        }
    }
}
