//! # Movie Repository
//!
//! Provides a high‑level API over the Movie store, mirroring
//! [`ActorRepository`](super::ActorRepository) with title uniqueness.
use crate::model::Movie;
use crate::movie_store::{MovieAction, MovieError};
use async_trait::async_trait;
use entity_framework::{EntityRepository, FrameworkError, StoreClient};
use tracing::{debug, instrument, warn};

/// Repository for Movie records.
#[derive(Clone)]
pub struct MovieRepository {
    inner: StoreClient<Movie>,
}

impl MovieRepository {
    pub fn new(inner: StoreClient<Movie>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityRepository<Movie> for MovieRepository {
    type Error = MovieError;

    fn inner(&self) -> &StoreClient<Movie> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl MovieRepository {
    /// The first movie whose title matches, ignoring case and padding.
    #[instrument(skip(self))]
    pub async fn find_by_title(&self, title: &str) -> Result<Option<Movie>, MovieError> {
        let title = title.to_string();
        let matches = self
            .inner
            .find(move |movie: &Movie| movie.has_title(&title))
            .await
            .map_err(Self::map_error)?;
        Ok(matches.into_iter().next())
    }

    /// Inserts a new movie unless one with the same title already exists.
    #[instrument(skip(self, movie), fields(id = %movie.id))]
    pub async fn insert(&self, movie: Movie) -> Result<Movie, MovieError> {
        debug!(?movie, "insert called");
        if let Some(existing) = self.find_by_title(&movie.title).await? {
            warn!(existing_id = %existing.id, "Duplicate movie title");
            return Err(MovieError::AlreadyExists(movie.title));
        }
        self.inner.insert(movie).await.map_err(Self::map_error)
    }

    /// Overwrites every field but the id of the matching movie.
    #[instrument(skip(self, movie), fields(id = %movie.id))]
    pub async fn replace(&self, movie: Movie) -> Result<Option<Movie>, MovieError> {
        self.inner.replace(movie).await.map_err(Self::map_error)
    }

    /// Appends `actor_ids` to the movie's `starringActor`. Returns `false` when no movie matched.
    #[instrument(skip(self))]
    pub async fn link_actors(
        &self,
        movie_id: &str,
        actor_ids: Vec<String>,
    ) -> Result<bool, MovieError> {
        let linked = self
            .inner
            .perform_action(movie_id.to_string(), MovieAction::LinkActors(actor_ids))
            .await
            .map_err(Self::map_error)?;
        Ok(linked.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_find_by_title_ignores_case_and_whitespace() {
        let mut mock = MockClient::<Movie>::new();
        mock.expect_find().return_ok(vec![
            Movie::new("m1", "Heat", "1995"),
            Movie::seed(),
        ]);
        let repository = MovieRepository::new(mock.client());

        let found = repository
            .find_by_title("  the SHAWSHANK redemption ")
            .await
            .unwrap();

        assert_eq!(found, Some(Movie::seed()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_by_title_misses() {
        let mut mock = MockClient::<Movie>::new();
        mock.expect_find().return_ok(vec![Movie::seed()]);
        let repository = MovieRepository::new(mock.client());

        assert_eq!(repository.find_by_title("Heat").await, Ok(None));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_title_before_store() {
        let mut mock = MockClient::<Movie>::new();
        mock.expect_find().return_ok(vec![Movie::seed()]);
        let repository = MovieRepository::new(mock.client());

        let result = repository
            .insert(Movie::new("m2", "the shawshank redemption", "2001"))
            .await;

        assert!(matches!(result, Err(MovieError::AlreadyExists(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn test_replace_reports_missing_movie() {
        let mut mock = MockClient::<Movie>::new();
        mock.expect_replace().return_ok(None);
        let repository = MovieRepository::new(mock.client());

        let replaced = repository
            .replace(Movie::new("ghost", "Heat", "1995"))
            .await
            .unwrap();

        assert_eq!(replaced, None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_link_actors_sends_ids_in_order() {
        let (client, mut receiver) = create_mock_client::<Movie>(10);
        let repository = MovieRepository::new(client);

        let link_task = tokio::spawn(async move {
            repository
                .link_actors("m1", vec!["a2".into(), "a1".into()])
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, "m1");
        assert_eq!(
            action,
            MovieAction::LinkActors(vec!["a2".into(), "a1".into()])
        );
        responder.send(Ok(None)).unwrap();

        assert_eq!(link_task.await.unwrap(), Ok(false));
    }
}
