//! Domain errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No role on the current session")]
    MissingRole,

    #[error("Menu fetch failed: {0}")]
    MenuFetchFailed(String),

    #[error("Count fetch failed: {0}")]
    CountFetchFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
