//! [`StoreEntity`] implementation for [`Movie`].

use super::{MovieAction, MovieError};
use crate::model::Movie;
use entity_framework::StoreEntity;

impl StoreEntity for Movie {
    type Action = MovieAction;
    type ActionResult = Movie;
    type Error = MovieError;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![Movie::seed()]
    }

    fn apply_replace(&mut self, incoming: Self) -> Result<(), MovieError> {
        self.title = incoming.title;
        self.year = incoming.year;
        self.genre = incoming.genre;
        self.starring_actor = incoming.starring_actor;
        Ok(())
    }

    fn handle_action(&mut self, action: MovieAction) -> Result<Movie, MovieError> {
        match action {
            MovieAction::LinkActors(actor_ids) => {
                self.starring_actor.extend(actor_ids);
                Ok(self.clone())
            }
        }
    }
}
