//! # Actor Store
//!
//! The [`EntityStore`] holding every [`Actor`].
//!
//! ## Structure
//!
//! - [`entity`] - [`StoreEntity`](entity_framework::StoreEntity) implementation for [`Actor`]
//! - [`actions`] - [`ActorAction`] for in-place filmography appends
//! - [`error`] - [`ActorError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the store and its client
//!
//! ## Usage
//!
//! ```rust
//! use movies_api::actor_store;
//! use movies_api::repositories::ActorRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (store, client) = actor_store::new(32);
//!     tokio::spawn(store.run());
//!
//!     client.seed_if_empty().await?;
//!     let actors = ActorRepository::new(client);
//!     assert!(actors.find_by_name("tim", "robbins").await?.is_some());
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Actor;
use entity_framework::{EntityStore, StoreClient};

/// Creates a new Actor store and its client.
pub fn new(buffer_size: usize) -> (EntityStore<Actor>, StoreClient<Actor>) {
    EntityStore::new(buffer_size)
}
