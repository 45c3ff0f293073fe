//! # Generic Entity Store
//!
//! This module defines the `EntityStore`, the component that owns one collection of
//! records and serves every request against it. It runs as its own Tokio task, processing
//! messages sequentially, so each individual request (a lookup, an insert, an append to a
//! link list) observes and leaves a consistent collection.

use crate::client::StoreClient;
use crate::entity::{ids_match, normalize_id, StoreEntity};
use crate::error::FrameworkError;
use crate::message::StoreRequest;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic store that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the records and the receiver
/// end of the channel. Callers only ever hold a [`StoreClient`].
///
/// **Concurrency Model**:
/// Requests are handled one at a time in [`EntityStore::run`], so the collection needs no
/// `Mutex`. A caller that reads, decides, then writes spans several requests, and other
/// writers may interleave between them.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `EntityStore::new()` to get the `store` (server) and `client` (interface).
/// 2.  **Run**: Spawn `store.run()` in a background task.
/// 3.  **Seed**: Call `client.seed_if_empty()` once during startup.
///
/// ```rust
/// use entity_framework::{EntityStore, StoreEntity};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: String, text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// impl StoreEntity for Note {
///     type Action = ();
///     type ActionResult = ();
///     type Error = NoteError;
///
///     fn id(&self) -> &str { &self.id }
///     fn apply_replace(&mut self, incoming: Self) -> Result<(), NoteError> {
///         self.text = incoming.text;
///         Ok(())
///     }
///     fn handle_action(&mut self, _: ()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (store, client) = EntityStore::<Note>::new(10);
///     tokio::spawn(store.run());
///
///     let note = Note { id: "n1".into(), text: "hello".into() };
///     client.insert(note).await.unwrap();
///     assert!(client.get(" N1 ".into()).await.unwrap().is_some());
/// }
/// ```
///
/// # Implementation Details
///
/// Records are kept in a `Vec` in insertion order; `List` returns them in that order and
/// `GetMany` / `Find` filter it without reordering.
pub struct EntityStore<T: StoreEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    entities: Vec<T>,
}

impl<T: StoreEntity> EntityStore<T> {
    /// Creates a new `EntityStore` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            entities: Vec::new(),
        };
        let client = StoreClient::new(sender);
        (store, client)
    }

    /// Runs the store's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Just the type name, e.g. "Actor" instead of "movies_api::model::actor::Actor"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { respond_to } => {
                    debug!(entity_type, size = self.entities.len(), "List");
                    let _ = respond_to.send(Ok(self.entities.clone()));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.entities.iter().find(|e| ids_match(e.id(), &id)).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::GetMany { ids, respond_to } => {
                    let wanted: HashSet<String> = ids.iter().map(|id| normalize_id(id)).collect();
                    let items: Vec<T> = self
                        .entities
                        .iter()
                        .filter(|e| wanted.contains(&normalize_id(e.id())))
                        .cloned()
                        .collect();
                    debug!(entity_type, requested = ids.len(), found = items.len(), "GetMany");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Find {
                    predicate,
                    respond_to,
                } => {
                    let items: Vec<T> = self
                        .entities
                        .iter()
                        .filter(|&e| predicate(e))
                        .cloned()
                        .collect();
                    debug!(entity_type, found = items.len(), "Find");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Insert { entity, respond_to } => {
                    debug!(entity_type, ?entity, "Insert");
                    let id = entity.id().to_string();
                    if id.trim().is_empty() {
                        warn!(entity_type, "Insert rejected: missing id");
                        let _ = respond_to.send(Err(FrameworkError::MissingId));
                        continue;
                    }
                    if self.entities.iter().any(|e| ids_match(e.id(), &id)) {
                        warn!(entity_type, %id, "Insert rejected: duplicate id");
                        let _ = respond_to.send(Err(FrameworkError::DuplicateId(id)));
                        continue;
                    }
                    self.entities.push(entity.clone());
                    info!(entity_type, %id, size = self.entities.len(), "Inserted");
                    let _ = respond_to.send(Ok(entity));
                }
                StoreRequest::Replace { entity, respond_to } => {
                    let id = entity.id().to_string();
                    debug!(entity_type, %id, ?entity, "Replace");
                    let result = self.replace_matching(&id, entity);
                    match &result {
                        Ok(Some(_)) => info!(entity_type, %id, "Replaced"),
                        Ok(None) => warn!(entity_type, %id, "Replace matched nothing"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Replace failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Delete { id, respond_to } => {
                    let before = self.entities.len();
                    self.entities.retain(|e| !ids_match(e.id(), &id));
                    let removed = self.entities.len() < before;
                    if removed {
                        info!(entity_type, %id, size = self.entities.len(), "Deleted");
                    } else {
                        debug!(entity_type, %id, "Delete matched nothing");
                    }
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.act_on_matching(&id, action);
                    match &result {
                        Ok(Some(_)) => info!(entity_type, %id, "Action ok"),
                        Ok(None) => warn!(entity_type, %id, "Action matched nothing"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Seed { respond_to } => {
                    let seeded = if self.entities.is_empty() {
                        self.entities = T::seed();
                        self.entities.len()
                    } else {
                        0
                    };
                    info!(entity_type, seeded, size = self.entities.len(), "Seed");
                    let _ = respond_to.send(Ok(seeded));
                }
            }
        }

        info!(entity_type, size = self.entities.len(), "Shutdown");
    }

    /// Overwrites every record whose id matches; answers with the last one written.
    fn replace_matching(&mut self, id: &str, incoming: T) -> Result<Option<T>, FrameworkError> {
        let mut replaced = None;
        for item in self.entities.iter_mut().filter(|e| ids_match(e.id(), id)) {
            item.apply_replace(incoming.clone())
                .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
            replaced = Some(item.clone());
        }
        Ok(replaced)
    }

    /// Runs `action` on the first record whose id matches.
    fn act_on_matching(
        &mut self,
        id: &str,
        action: T::Action,
    ) -> Result<Option<T::ActionResult>, FrameworkError> {
        match self.entities.iter_mut().find(|e| ids_match(e.id(), id)) {
            Some(item) => item
                .handle_action(action)
                .map(Some)
                .map_err(|e| FrameworkError::EntityError(Box::new(e))),
            None => Ok(None),
        }
    }
}
