//! # System Lifecycle
//!
//! Starting, seeding and stopping the two stores.
//!
//! ## Startup
//!
//! [`MovieSystem::start`] runs the whole sequence once:
//!
//! 1. **Store Creation** - one [`EntityStore`](entity_framework::EntityStore) per entity type
//! 2. **Spawn** - each store's event loop in its own Tokio task
//! 3. **Seed** - a single `seed_if_empty` per store, so a fresh process holds one actor and
//!    one movie linked to each other
//! 4. **Wiring** - repositories and the shared [`ResilientExecutor`](resilience::ResilientExecutor)
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - the HTTP state must already be gone, then the system's own
//!    repositories are dropped
//! 2. **Stores detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - each store logs its final size and its task ends

pub mod movie_system;

pub use movie_system::*;
