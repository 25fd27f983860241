use thiserror::Error;

/// Errors that can occur during store and repository operations.
///
/// A missing record is not an error: reads return `Ok(None)` or an empty list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Batch write left {unprocessed} item(s) unprocessed")]
    PartialBatch { unprocessed: usize },
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Table",
            id: "payments-table".to_string(),
        };
        assert_eq!(error.to_string(), "Table not found: payments-table");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Payment",
            id: "1#pending".to_string(),
        };
        assert_eq!(error.to_string(), "Payment already exists: 1#pending");
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout");
    }

    #[test]
    fn test_repository_error_partial_batch_display() {
        let error = RepositoryError::PartialBatch { unprocessed: 2 };
        assert_eq!(
            error.to_string(),
            "Batch write left 2 item(s) unprocessed"
        );
    }
}
