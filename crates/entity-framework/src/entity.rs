//! # StoreEntity Trait
//!
//! The `StoreEntity` trait is the contract every record type (Actor, Movie, …) implements
//! to be held by the generic [`EntityStore`](crate::EntityStore). It names the entity's
//! identifier, the seed records used to populate an empty collection, how a full
//! replacement is applied in place, and the entity-specific actions the store can run
//! atomically on a matching record.
//!
//! # Identifier Semantics
//! Ids are plain strings. Every comparison goes through [`ids_match`], which trims
//! surrounding whitespace and ignores case, so `" ABC "` and `"abc"` address the same record.

use std::fmt::Debug;

/// Trait that any record type must implement to be held by an `EntityStore`.
///
/// # Architecture Note
/// By defining one contract for every collection, the store loop (lookup, insert,
/// replace, delete, actions, seeding) is written *once* and reused for each entity type.
///
/// # Provided Methods
/// - [`StoreEntity::seed`] defaults to no records.
pub trait StoreEntity: Clone + Send + Sync + Debug + 'static {
    /// Enum representing entity-specific mutations (e.g., appending linked ids).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier as stored on the record.
    fn id(&self) -> &str;

    /// Records used to populate the collection when it is empty at startup.
    fn seed() -> Vec<Self> {
        Vec::new()
    }

    /// Overwrites the mutable fields of `self` with those of `incoming`.
    ///
    /// The id is never touched; the store only calls this on records whose id matches.
    fn apply_replace(&mut self, incoming: Self) -> Result<(), Self::Error>;

    /// Handle a custom entity-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Normalizes an id for comparison: trimmed and lowercased.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed id equality.
pub fn ids_match(left: &str, right: &str) -> bool {
    normalize_id(left) == normalize_id(right)
}
