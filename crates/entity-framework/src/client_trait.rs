//! # EntityRepository Trait
//!
//! Provides a common interface for entity-specific repositories, adding default
//! `get_all`, `get_by_id`, `get_by_ids` and `delete` methods built on top of a generic
//! `StoreClient`.
use crate::{FrameworkError, StoreClient, StoreEntity};
use async_trait::async_trait;

/// Trait for entity-specific repositories to inherit the standard collection reads and delete.
///
/// # Example
///
/// ```rust
/// use entity_framework::{EntityRepository, FrameworkError, StoreClient, StoreEntity};
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: String }
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct TagError(String);
///
/// impl StoreEntity for Tag {
///     type Action = ();
///     type ActionResult = ();
///     type Error = TagError;
///     fn id(&self) -> &str { &self.id }
///     fn apply_replace(&mut self, _: Self) -> Result<(), TagError> { Ok(()) }
///     fn handle_action(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagRepository {
///     inner: StoreClient<Tag>,
/// }
///
/// impl EntityRepository<Tag> for TagRepository {
///     type Error = TagError;
///
///     fn inner(&self) -> &StoreClient<Tag> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         TagError(e.to_string())
///     }
/// }
///
/// async fn usage(repository: TagRepository) {
///     // get_all(), get_by_id(), get_by_ids() and delete() are provided automatically.
///     let _ = repository.get_by_id("t1").await;
///     let _ = repository.delete("t1").await;
/// }
/// ```
#[async_trait]
pub trait EntityRepository<T: StoreEntity>: Send + Sync {
    /// The entity-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map framework errors to the entity-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch every entity in store order.
    #[tracing::instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Fetch an entity by id (case-insensitive, trimmed).
    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .get(id.to_string())
            .await
            .map_err(Self::map_error)
    }

    /// Fetch the entities whose ids appear in `ids`, in store order.
    #[tracing::instrument(skip(self))]
    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .get_many(ids.to_vec())
            .await
            .map_err(Self::map_error)
    }

    /// Remove an entity by id. Returns `false` when nothing matched.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<bool, Self::Error> {
        tracing::debug!("Sending request");
        self.inner()
            .delete(id.to_string())
            .await
            .map_err(Self::map_error)
    }
}
