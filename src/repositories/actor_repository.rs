//! # Actor Repository
//!
//! Provides a high‑level API over the Actor store. It wraps a `StoreClient<Actor>` and
//! exposes the actor-specific rules.
use crate::actor_store::{ActorAction, ActorError};
use crate::model::Actor;
use async_trait::async_trait;
use entity_framework::{EntityRepository, FrameworkError, StoreClient};
use tracing::{debug, instrument, warn};

/// Repository for Actor records.
#[derive(Clone)]
pub struct ActorRepository {
    inner: StoreClient<Actor>,
}

impl ActorRepository {
    pub fn new(inner: StoreClient<Actor>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityRepository<Actor> for ActorRepository {
    type Error = ActorError;

    fn inner(&self) -> &StoreClient<Actor> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl ActorRepository {
    /// The first actor whose first and last name both match, ignoring case and padding.
    #[instrument(skip(self))]
    pub async fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Actor>, ActorError> {
        let (first, last) = (first_name.to_string(), last_name.to_string());
        let matches = self
            .inner
            .find(move |actor: &Actor| actor.has_name(&first, &last))
            .await
            .map_err(Self::map_error)?;
        Ok(matches.into_iter().next())
    }

    /// Inserts a new actor unless one with the same name already exists.
    #[instrument(skip(self, actor), fields(id = %actor.id))]
    pub async fn insert(&self, actor: Actor) -> Result<Actor, ActorError> {
        debug!(?actor, "insert called");
        if let Some(existing) = self
            .find_by_name(&actor.first_name, &actor.last_name)
            .await?
        {
            warn!(existing_id = %existing.id, "Duplicate actor name");
            return Err(ActorError::AlreadyExists(format!(
                "{} {}",
                actor.first_name, actor.last_name
            )));
        }
        self.inner.insert(actor).await.map_err(Self::map_error)
    }

    /// Overwrites every field but the id of the matching actor.
    ///
    /// Returns `None` when no actor has that id.
    #[instrument(skip(self, actor), fields(id = %actor.id))]
    pub async fn replace(&self, actor: Actor) -> Result<Option<Actor>, ActorError> {
        self.inner.replace(actor).await.map_err(Self::map_error)
    }

    /// Appends `movie_ids` to the actor's filmography.
    ///
    /// The ids are not checked against the movie store. Returns `false` when no actor matched.
    #[instrument(skip(self))]
    pub async fn link_movies(
        &self,
        actor_id: &str,
        movie_ids: Vec<String>,
    ) -> Result<bool, ActorError> {
        let linked = self
            .inner
            .perform_action(actor_id.to_string(), ActorAction::LinkMovies(movie_ids))
            .await
            .map_err(Self::map_error)?;
        Ok(linked.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_framework::mock::{create_mock_client, expect_action, MockClient};

    fn actor(id: &str, first: &str, last: &str) -> Actor {
        Actor::new(id, first, last)
    }

    #[tokio::test]
    async fn test_find_by_name_ignores_case_and_whitespace() {
        let mut mock = MockClient::<Actor>::new();
        mock.expect_find().return_ok(vec![
            actor("a1", "Morgan", "Freeman"),
            actor("a2", "Tim", "Robbins"),
        ]);
        let repository = ActorRepository::new(mock.client());

        let found = repository.find_by_name(" tim ", "ROBBINS").await.unwrap();

        assert_eq!(found.map(|a| a.id), Some("a2".to_string()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_name_before_store() {
        let mut mock = MockClient::<Actor>::new();
        mock.expect_find()
            .return_ok(vec![actor("a1", "Tim", "Robbins")]);
        let repository = ActorRepository::new(mock.client());

        let result = repository.insert(actor("a9", "TIM", " robbins")).await;

        assert_eq!(
            result,
            Err(ActorError::AlreadyExists("TIM  robbins".to_string()))
        );
        // No Insert expectation was queued, so reaching the store would have failed the call
        mock.verify();
    }

    #[tokio::test]
    async fn test_insert_passes_unique_actor_to_store() {
        let mut mock = MockClient::<Actor>::new();
        mock.expect_find().return_ok(vec![actor("a1", "Tim", "Robbins")]);
        mock.expect_insert().return_ok(());
        let repository = ActorRepository::new(mock.client());

        let inserted = repository
            .insert(actor("a2", "Morgan", "Freeman"))
            .await
            .unwrap();

        assert_eq!(inserted.id, "a2");
        mock.verify();
    }

    #[tokio::test]
    async fn test_duplicate_id_maps_to_already_exists() {
        let mut mock = MockClient::<Actor>::new();
        mock.expect_find().return_ok(vec![]);
        mock.expect_insert()
            .return_err(FrameworkError::DuplicateId("a1".into()));
        let repository = ActorRepository::new(mock.client());

        let result = repository.insert(actor("a1", "Morgan", "Freeman")).await;

        assert_eq!(result, Err(ActorError::AlreadyExists("id a1".into())));
    }

    #[tokio::test]
    async fn test_link_movies_sends_ids_in_order() {
        let (client, mut receiver) = create_mock_client::<Actor>(10);
        let repository = ActorRepository::new(client);

        let link_task = tokio::spawn(async move {
            repository
                .link_movies("a1", vec!["m1".into(), "m2".into()])
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, "a1");
        assert_eq!(
            action,
            ActorAction::LinkMovies(vec!["m1".into(), "m2".into()])
        );
        responder.send(Ok(Some(actor("a1", "Tim", "Robbins")))).unwrap();

        assert_eq!(link_task.await.unwrap(), Ok(true));
    }

    #[tokio::test]
    async fn test_link_movies_reports_missing_actor() {
        let mut mock = MockClient::<Actor>::new();
        mock.expect_action().return_ok(None);
        let repository = ActorRepository::new(mock.client());

        let linked = repository
            .link_movies("ghost", vec!["m1".into()])
            .await
            .unwrap();

        assert!(!linked);
    }

    #[tokio::test]
    async fn test_store_failure_maps_to_store_error() {
        let mut mock = MockClient::<Actor>::new();
        mock.expect_list().return_err(FrameworkError::StoreClosed);
        let repository = ActorRepository::new(mock.client());

        let result = repository.get_all().await;

        assert_eq!(result, Err(ActorError::StoreError("Store closed".into())));
    }
}
