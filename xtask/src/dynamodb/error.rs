//! Error types for DynamoDB operations.

use paylookup_core::storage::RepositoryError;
use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur during DynamoDB operations.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },

    #[error("Table '{table_name}' is {status}, not ACTIVE")]
    TableNotActive { table_name: String, status: String },

    #[error("Table '{table_name}' exists with a different key schema: {details}")]
    SchemaMismatch { table_name: String, details: String },

    #[error("Seeding left {count} record(s) unwritten")]
    PartialSeed { count: usize },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table to become active")]
    TableActivationTimeout,
}
