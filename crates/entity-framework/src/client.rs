//! # Generic Client
//!
//! This module defines the generic client for communicating with an `EntityStore`.

use crate::entity::StoreEntity;
use crate::error::FrameworkError;
use crate::message::{Response, StoreRequest};
use tokio::sync::{mpsc, oneshot};

/// ## StoreClient
///
/// The `StoreClient<T>` provides a type‑safe, async API over a running `EntityStore<T>`.
/// It forwards requests over a Tokio mpsc channel and awaits the answer on a oneshot
/// channel. It holds only a sender, so cloning is cheap and clones can be shared across tasks.
#[derive(Clone)]
pub struct StoreClient<T: StoreEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: StoreEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    /// Sends one request built around a fresh response channel and waits for the reply.
    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::StoreClosed)?;
        response.await.map_err(|_| FrameworkError::StoreDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::List { respond_to })
            .await
    }

    pub async fn get(&self, id: String) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn get_many(&self, ids: Vec<String>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::GetMany { ids, respond_to })
            .await
    }

    /// Returns every record for which `predicate` holds, in store order.
    pub async fn find<P>(&self, predicate: P) -> Result<Vec<T>, FrameworkError>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.request(|respond_to| StoreRequest::Find {
            predicate: Box::new(predicate),
            respond_to,
        })
        .await
    }

    pub async fn insert(&self, entity: T) -> Result<T, FrameworkError> {
        self.request(|respond_to| StoreRequest::Insert { entity, respond_to })
            .await
    }

    pub async fn replace(&self, entity: T) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| StoreRequest::Replace { entity, respond_to })
            .await
    }

    pub async fn delete(&self, id: String) -> Result<bool, FrameworkError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: String,
        action: T::Action,
    ) -> Result<Option<T::ActionResult>, FrameworkError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Populates an empty store from its seed records. Returns how many were added.
    pub async fn seed_if_empty(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| StoreRequest::Seed { respond_to })
            .await
    }
}
