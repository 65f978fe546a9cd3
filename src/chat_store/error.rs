use thiserror::Error;

/// Result type for chat store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for chat store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection error - database unreachable, bad connection string or authentication failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error - connection pool exhausted or closed
    #[error("Pool error: {0}")]
    Pool(String),

    /// Database error - SQL errors, constraint violations
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error - a stored record has an unexpected shape
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The configured table name cannot be used as an SQL identifier
    #[error("Invalid table name '{0}'")]
    InvalidTableName(String),
}

/// Convert tokio-postgres errors to chat store errors
impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            return StoreError::Database(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }

        if err.is_closed() {
            return StoreError::Connection(err.to_string());
        }

        StoreError::Database(format!("{:?}", err))
    }
}

/// Convert deadpool errors to chat store errors
impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

/// Convert deadpool build errors to chat store errors
impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
