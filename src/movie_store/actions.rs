//! Custom actions for the Movie store.

/// Custom actions for Movie records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieAction {
    /// Appends actor ids to `starringActor`, keeping order and duplicates.
    LinkActors(Vec<String>),
}
