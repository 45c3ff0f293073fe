//! Error types for the Actor store and repository.

use entity_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during actor operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActorError {
    /// An actor with the same name (or id) already exists.
    #[error("Actor already exists: {0}")]
    AlreadyExists(String),

    /// An error occurred while communicating with the store.
    #[error("Actor store error: {0}")]
    StoreError(String),
}

impl From<FrameworkError> for ActorError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::DuplicateId(id) => ActorError::AlreadyExists(format!("id {id}")),
            other => ActorError::StoreError(other.to_string()),
        }
    }
}
