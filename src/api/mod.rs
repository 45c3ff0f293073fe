//! # HTTP API
//!
//! Thin axum controllers over the repositories: input validation, default merging and
//! status mapping. Collection reads go through the shared
//! [`ResilientExecutor`](resilience::ResilientExecutor); everything else calls the
//! repositories directly.
//!
//! - [`router`] - route table and middleware
//! - [`error`] - [`ApiError`] and the JSON error body
//! - [`actor_controller`] / [`movie_controller`] - the handlers

pub mod actor_controller;
pub mod error;
pub mod movie_controller;
pub mod router;

pub use error::{ApiError, ErrorResponse};
pub use router::{app, routes, with_middleware};

use crate::repositories::{ActorRepository, MovieRepository};
use resilience::ResilientExecutor;

#[derive(Clone)]
pub struct AppState {
    pub actors: ActorRepository,
    pub movies: MovieRepository,
    pub executor: ResilientExecutor,
}

/// Ids from the query string of the `GetByIds` routes.
///
/// Accepts both `?ids=a,b` and `?ids=a&ids=b` (or a mix); the key is matched ignoring
/// case. Ids are trimmed and blanks dropped.
fn ids_from_query(pairs: Vec<(String, String)>) -> Vec<String> {
    pairs
        .into_iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case("ids"))
        .flat_map(|(_, value)| {
            value
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Trims a path id, rejecting a blank one.
fn required_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::BadRequest("Id is required".to_string()));
    }
    Ok(id)
}

/// Rejects an update whose body names a different record than the path.
fn check_body_id(path_id: &str, body_id: Option<&str>) -> Result<(), ApiError> {
    match body_id.map(str::trim) {
        Some(body_id) if !body_id.is_empty() && !entity_framework::ids_match(body_id, path_id) => {
            Err(ApiError::BadRequest(format!(
                "Body id {body_id} does not match path id {path_id}"
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_ids_from_query_splits_and_trims() {
        let ids = ids_from_query(pairs(&[("ids", " a1, ,b2,,c3 ")]));
        assert_eq!(ids, vec!["a1", "b2", "c3"]);
        assert!(ids_from_query(Vec::new()).is_empty());
    }

    #[test]
    fn test_ids_from_query_accepts_repeated_keys() {
        let ids = ids_from_query(pairs(&[
            ("ids", "a1"),
            ("page", "2"),
            ("Ids", "b2,c3"),
            ("ids", ""),
        ]));
        assert_eq!(ids, vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn test_required_id() {
        assert_eq!(required_id("  abc ").unwrap(), "abc");
        assert!(matches!(required_id("   "), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_check_body_id() {
        assert!(check_body_id("abc", None).is_ok());
        assert!(check_body_id("abc", Some(" ")).is_ok());
        assert!(check_body_id("abc", Some(" ABC ")).is_ok());
        assert!(check_body_id("abc", Some("xyz")).is_err());
    }
}
