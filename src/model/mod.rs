//! Records held by the stores and the request bodies they are built from.

pub mod actor;
pub mod movie;
pub mod validation;

pub use actor::*;
pub use movie::*;
pub use validation::*;

/// Id of the actor present in a freshly seeded store.
pub const SEED_ACTOR_ID: &str = "4c3bb8c9-5c4a-4c96-979a-6c47d9a620cd";

/// Id of the movie present in a freshly seeded store.
pub const SEED_MOVIE_ID: &str = "f8fb31ce-467a-4174-a799-ad2ec3b82384";

/// The caller's id if it is present and not blank, otherwise a fresh UUID v4.
pub(crate) fn id_or_new(id: Option<String>) -> String {
    match id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => uuid::Uuid::new_v4().to_string(),
    }
}
