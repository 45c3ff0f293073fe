use super::validation::{required, validate_birth_day, ValidationError};
use super::{id_or_new, SEED_ACTOR_ID, SEED_MOVIE_ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person who appears in movies.
///
/// # Entity Store
/// This struct implements [`StoreEntity`](entity_framework::StoreEntity) in
/// [`crate::actor_store`], which is where its seed record, replacement rule and
/// [`ActorAction`](crate::actor_store::ActorAction)s live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_day: Option<String>,
    /// Ids of the movies this actor appears in, in link order
    pub filmography: Vec<String>,
}

impl Actor {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_day: None,
            filmography: Vec::new(),
        }
    }

    /// Tim Robbins, linked to the seeded movie.
    pub fn seed() -> Self {
        Self {
            id: SEED_ACTOR_ID.to_string(),
            first_name: "Tim".to_string(),
            last_name: "Robbins".to_string(),
            birth_day: Some("10-16-1958".to_string()),
            filmography: vec![SEED_MOVIE_ID.to_string()],
        }
    }

    /// Case-insensitive, trimmed comparison on both name fields.
    pub fn has_name(&self, first_name: &str, last_name: &str) -> bool {
        same_text(&self.first_name, first_name) && same_text(&self.last_name, last_name)
    }
}

pub(crate) fn same_text(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// Request body for creating or updating an actor. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorInput {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_day: Option<String>,
    pub filmography: Option<Vec<String>>,
}

impl ActorInput {
    /// Validates the body and builds a new actor.
    ///
    /// Names are trimmed, a missing or blank id becomes a fresh UUID and a missing
    /// filmography becomes empty.
    pub fn into_new_actor(self, today: NaiveDate) -> Result<Actor, ValidationError> {
        let first_name = required("FirstName", self.first_name)?;
        let last_name = required("LastName", self.last_name)?;
        let birth_day = checked_birth_day(self.birth_day, today)?;

        Ok(Actor {
            id: id_or_new(self.id),
            first_name,
            last_name,
            birth_day,
            filmography: self.filmography.unwrap_or_default(),
        })
    }

    /// Validates the body and merges it over `existing`.
    ///
    /// An omitted `birthDay` or an empty filmography keeps the stored value; the id is
    /// always the stored one.
    pub fn merge_into(self, existing: &Actor, today: NaiveDate) -> Result<Actor, ValidationError> {
        let first_name = required("FirstName", self.first_name)?;
        let last_name = required("LastName", self.last_name)?;
        let birth_day = match checked_birth_day(self.birth_day, today)? {
            Some(birth_day) => Some(birth_day),
            None => existing.birth_day.clone(),
        };
        let filmography = match self.filmography {
            Some(ids) if !ids.is_empty() => ids,
            _ => existing.filmography.clone(),
        };

        Ok(Actor {
            id: existing.id.clone(),
            first_name,
            last_name,
            birth_day,
            filmography,
        })
    }
}

fn checked_birth_day(
    value: Option<String>,
    today: NaiveDate,
) -> Result<Option<String>, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => {
            validate_birth_day(&v, today)?;
            Ok(Some(v.trim().to_string()))
        }
        _ => Ok(None),
    }
}
