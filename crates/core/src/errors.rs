//! Core error types for BrokerDeck.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the directory.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value could not be decoded into its domain type.
    #[error("Corrupt column value: {0}")]
    Decode(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unknown value '{value}' for '{field}'")]
    UnknownValue { field: String, value: String },
}

impl ValidationError {
    pub fn unknown(field: &str, value: &str) -> Self {
        ValidationError::UnknownValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Errors raised while reading blog content files.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read content: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing front matter in {0}")]
    MissingFrontMatter(String),

    #[error("Invalid front matter in {file}: {message}")]
    InvalidFrontMatter { file: String, message: String },
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Content(ContentError::Io(err))
    }
}
