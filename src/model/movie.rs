use super::actor::same_text;
use super::validation::{required, validate_year, ValidationError};
use super::{id_or_new, SEED_ACTOR_ID, SEED_MOVIE_ID};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie and the actors starring in it.
///
/// `year` is kept as text; it is checked to be an integer before the current year when a
/// request body is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: String,
    pub genre: Option<String>,
    /// Ids of the starring actors, in link order
    pub starring_actor: Vec<String>,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            genre: None,
            starring_actor: Vec::new(),
        }
    }

    /// The Shawshank Redemption, linked to the seeded actor.
    pub fn seed() -> Self {
        Self {
            id: SEED_MOVIE_ID.to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: "1994".to_string(),
            genre: Some("Drama".to_string()),
            starring_actor: vec![SEED_ACTOR_ID.to_string()],
        }
    }

    /// Case-insensitive, trimmed title comparison.
    pub fn has_title(&self, title: &str) -> bool {
        same_text(&self.title, title)
    }
}

/// Request body for creating or updating a movie. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub starring_actor: Option<Vec<String>>,
}

impl MovieInput {
    fn checked_title_and_year(
        title: Option<String>,
        year: Option<String>,
        today: NaiveDate,
    ) -> Result<(String, String), ValidationError> {
        let title = required("Title", title)?;
        let year = required("Year", year)?;
        validate_year(&year, today)?;
        Ok((title, year))
    }

    /// Validates the body and builds a new movie.
    pub fn into_new_movie(self, today: NaiveDate) -> Result<Movie, ValidationError> {
        let (title, year) = Self::checked_title_and_year(self.title, self.year, today)?;

        Ok(Movie {
            id: id_or_new(self.id),
            title,
            year,
            genre: self.genre,
            starring_actor: self.starring_actor.unwrap_or_default(),
        })
    }

    /// Validates the body and merges it over `existing`.
    ///
    /// An omitted `genre` or an empty `starringActor` keeps the stored value.
    pub fn merge_into(self, existing: &Movie, today: NaiveDate) -> Result<Movie, ValidationError> {
        let (title, year) = Self::checked_title_and_year(self.title, self.year, today)?;
        let starring_actor = match self.starring_actor {
            Some(ids) if !ids.is_empty() => ids,
            _ => existing.starring_actor.clone(),
        };

        Ok(Movie {
            id: existing.id.clone(),
            title,
            year,
            genre: self.genre.or_else(|| existing.genre.clone()),
            starring_actor,
        })
    }
}
