// ==========================================
// Station Registry - API layer error types
// ==========================================
// Converts lower-layer errors into the typed outcomes a caller (UI)
// reacts to: re-prompt on DuplicateKey, refresh on NotFound, "try
// again" on StoreUnavailable. Every error resolves at the boundary of
// one user operation; nothing lingers into the next interaction.
// ==========================================

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use crate::storage::StorageError;
use thiserror::Error;

/// API layer error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input rejected before any store access; nothing was written.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Business key already taken. Caller must re-prompt, not retry.
    #[error("duplicate business key: {0}")]
    DuplicateKey(String),

    /// Target row is gone (possibly deleted by another session); caller
    /// should refresh its view of the data.
    #[error("not found: {0}")]
    NotFound(String),

    /// Mutation attempted without the admin role.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Store could not be reached. Fatal for this operation, no retry.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Attachment write failed; the owning record was left unchanged.
    #[error("attachment write failed: {0}")]
    AttachmentWriteFailure(String),

    #[error("import failed: {0}")]
    Import(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => ApiError::Validation(msg),
            RepositoryError::DuplicateKey(msg) => ApiError::DuplicateKey(msg),
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{entity} (id={id})"))
            }
            RepositoryError::StoreUnavailable(msg) => ApiError::StoreUnavailable(msg),
            RepositoryError::LockError(msg) => ApiError::StoreUnavailable(msg),
            RepositoryError::QueryError(msg) => ApiError::Database(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::AttachmentWriteFailure(err.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Repository(repo_err) => repo_err.into(),
            other => ApiError::Import(other.to_string()),
        }
    }
}

/// Result alias for the API layer.
pub type ApiResult<T> = Result<T, ApiError>;
