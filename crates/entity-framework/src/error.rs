//! # Framework Errors
//!
//! This module defines the common error types used throughout the store framework.
//! Lookups that miss are not errors: they come back as `None`, `false` or an empty list.

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Entity id is missing")]
    MissingId,
    #[error("Entity with id {0} already exists")]
    DuplicateId(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
