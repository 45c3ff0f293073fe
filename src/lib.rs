//! # Movies API
//!
//! An in-memory CRUD service for movies and the actors who star in them, served over HTTP.
//!
//! Each record type lives in its own store task (see the `entity-framework` crate): a Tokio
//! task owning a `Vec` of records and answering requests from a channel, one at a time.
//! Nothing is shared behind a lock; callers hold cheap cloneable clients.
//!
//! ## Module Tour
//!
//! ### 1. The Records ([`model`])
//! [`Actor`](model::Actor) and [`Movie`](model::Movie), their request bodies and the
//! validation applied to them (birth days, release years, required fields).
//!
//! ### 2. The Stores ([`actor_store`], [`movie_store`])
//! `StoreEntity` implementations: how a record is replaced, seeded and linked.
//!
//! ### 3. The Rules ([`repositories`])
//! [`ActorRepository`](repositories::ActorRepository) and
//! [`MovieRepository`](repositories::MovieRepository) add lookups by natural key, duplicate
//! detection and the link operations on top of the generic store client.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`MovieSystem`](lifecycle::MovieSystem) spawns and seeds both stores, builds the shared
//! resilient executor and shuts everything down.
//!
//! ### 5. The Surface ([`api`], [`config`])
//! axum handlers, routes, the JSON error body and the environment-driven settings.
//!
//! ## Running
//!
//! ```bash
//! # Serve on 0.0.0.0:8080 with info logs
//! RUST_LOG=info cargo run
//!
//! # Different port, faster breaker recovery
//! MOVIES_API_PORT=5000 BREAKER_COOLDOWN_SECS=10 cargo run
//! ```

pub mod actor_store;
pub mod api;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod movie_store;
pub mod repositories;
