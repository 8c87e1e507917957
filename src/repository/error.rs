// ==========================================
// Station Registry - repository error types
// ==========================================
// thiserror derive; rusqlite failures are classified so callers can
// react to a duplicate key or an unreachable store without matching
// on message strings themselves.
// ==========================================

use thiserror::Error;

/// Repository layer error type.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Required field missing or malformed; nothing was written.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A live row already carries this business key. Raised by the
    /// advisory pre-check or by the store's UNIQUE constraint.
    #[error("duplicate business key: {0}")]
    DuplicateKey(String),

    /// Update/delete target is gone (e.g. deleted by another session).
    #[error("{entity} with id={id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The store could not be reached or opened. Fatal for the current
    /// operation; there is no automatic retry.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("connection lock poisoned: {0}")]
    LockError(String),

    #[error("query failed: {0}")]
    QueryError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::DuplicateKey(msg)
                } else if e.code == rusqlite::ErrorCode::CannotOpen {
                    RepositoryError::StoreUnavailable(msg)
                } else {
                    RepositoryError::QueryError(msg)
                }
            }
            rusqlite::Error::SqliteFailure(e, None) => {
                if e.code == rusqlite::ErrorCode::CannotOpen {
                    RepositoryError::StoreUnavailable(e.to_string())
                } else {
                    RepositoryError::QueryError(e.to_string())
                }
            }
            other => RepositoryError::QueryError(other.to_string()),
        }
    }
}

/// Result alias for the repository layer.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
