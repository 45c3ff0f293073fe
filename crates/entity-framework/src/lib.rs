//! # Entity Framework
//!
//! Building blocks for keeping in-memory collections of records behind a message-passing
//! boundary. Each collection is owned by one [`EntityStore`] task; callers talk to it
//! through a cloneable [`StoreClient`], and domain repositories layer their own rules on
//! top by implementing [`EntityRepository`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - the record type, its seed data, how a full
//!    replacement is applied and which in-place actions it supports
//! 2. **Runtime Layer** ([`EntityStore`]) - message processing over a bounded channel
//! 3. **Interface Layer** ([`StoreClient`], [`EntityRepository`]) - typed async calls
//!
//! ```rust
//! use entity_framework::{EntityStore, StoreEntity};
//!
//! #[derive(Clone, Debug)]
//! struct City { id: String, name: String, visits: u32 }
//!
//! #[derive(Debug)] enum CityAction { Visit }
//! #[derive(Debug, thiserror::Error)] #[error("city error")] struct CityError;
//!
//! impl StoreEntity for City {
//!     type Action = CityAction;
//!     type ActionResult = u32;
//!     type Error = CityError;
//!
//!     fn id(&self) -> &str { &self.id }
//!
//!     fn seed() -> Vec<Self> {
//!         vec![City { id: "lis".into(), name: "Lisbon".into(), visits: 0 }]
//!     }
//!
//!     fn apply_replace(&mut self, incoming: Self) -> Result<(), CityError> {
//!         self.name = incoming.name;
//!         Ok(())
//!     }
//!
//!     fn handle_action(&mut self, action: CityAction) -> Result<u32, CityError> {
//!         match action {
//!             CityAction::Visit => { self.visits += 1; Ok(self.visits) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, client) = EntityStore::<City>::new(10);
//!     let handle = tokio::spawn(store.run());
//!
//!     assert_eq!(client.seed_if_empty().await.unwrap(), 1);
//!     assert_eq!(client.perform_action("LIS".into(), CityAction::Visit).await.unwrap(), Some(1));
//!     assert_eq!(client.perform_action("nope".into(), CityAction::Visit).await.unwrap(), None);
//!
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own Tokio task and handles requests **sequentially**
//! - A single request (including an action) is atomic with respect to other requests
//! - A read-then-write sequence spans two requests and can interleave with other writers
//! - The task ends once every client clone has been dropped
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real [`StoreClient`] from a queue of expectations so
//! repository logic can be unit tested without a running store.

pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;
pub mod tracing;

pub use client::StoreClient;
pub use client_trait::EntityRepository;
pub use entity::{ids_match, normalize_id, StoreEntity};
pub use error::FrameworkError;
pub use message::{Predicate, Response, StoreRequest};
pub use store::EntityStore;
