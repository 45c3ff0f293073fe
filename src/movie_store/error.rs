//! Error types for the Movie store and repository.

use entity_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during movie operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MovieError {
    /// A movie with the same title (or id) already exists.
    #[error("Movie already exists: {0}")]
    AlreadyExists(String),

    /// An error occurred while communicating with the store.
    #[error("Movie store error: {0}")]
    StoreError(String),
}

impl From<FrameworkError> for MovieError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::DuplicateId(id) => MovieError::AlreadyExists(format!("id {id}")),
            other => MovieError::StoreError(other.to_string()),
        }
    }
}
