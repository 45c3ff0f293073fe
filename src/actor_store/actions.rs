//! Custom actions for the Actor store.
//!
//! Handled by [`StoreEntity::handle_action`](entity_framework::StoreEntity::handle_action)
//! inside the store task, so each one is applied atomically to the matching record.

/// Custom actions for Actor records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorAction {
    /// Appends movie ids to the filmography, keeping order and duplicates.
    LinkMovies(Vec<String>),
}
