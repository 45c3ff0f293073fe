//! [`StoreEntity`] implementation for [`Actor`].

use super::{ActorAction, ActorError};
use crate::model::Actor;
use entity_framework::StoreEntity;

impl StoreEntity for Actor {
    type Action = ActorAction;
    type ActionResult = Actor;
    type Error = ActorError;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![Actor::seed()]
    }

    /// Blind overwrite of every mutable field.
    fn apply_replace(&mut self, incoming: Self) -> Result<(), ActorError> {
        self.first_name = incoming.first_name;
        self.last_name = incoming.last_name;
        self.birth_day = incoming.birth_day;
        self.filmography = incoming.filmography;
        Ok(())
    }

    /// Returns the actor as it is after the action.
    fn handle_action(&mut self, action: ActorAction) -> Result<Actor, ActorError> {
        match action {
            ActorAction::LinkMovies(movie_ids) => {
                self.filmography.extend(movie_ids);
                Ok(self.clone())
            }
        }
    }
}
