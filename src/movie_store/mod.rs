//! # Movie Store
//!
//! The [`EntityStore`] holding every [`Movie`]. Mirrors [`crate::actor_store`]:
//!
//! - [`entity`] - [`StoreEntity`](entity_framework::StoreEntity) implementation for [`Movie`]
//! - [`actions`] - [`MovieAction`] for in-place cast appends
//! - [`error`] - [`MovieError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Movie;
use entity_framework::{EntityStore, StoreClient};

/// Creates a new Movie store and its client.
pub fn new(buffer_size: usize) -> (EntityStore<Movie>, StoreClient<Movie>) {
    EntityStore::new(buffer_size)
}
