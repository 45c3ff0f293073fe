//! # Repositories
//!
//! Typed wrappers over the two stores. The shared reads and delete come from
//! [`EntityRepository`](entity_framework::EntityRepository); each repository adds its
//! uniqueness check on insert, a blind replace, and the link append for its side of the
//! actor/movie relation.
//!
//! Links are one-directional: [`ActorRepository::link_movies`] never touches a movie's
//! `starringActor`, and [`MovieRepository::link_actors`] never touches an actor's
//! filmography.

pub mod actor_repository;
pub mod movie_repository;

pub use actor_repository::ActorRepository;
pub use movie_repository::MovieRepository;
