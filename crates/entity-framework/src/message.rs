//! # Store Messages
//!
//! This module defines the request types exchanged between the `StoreClient` and the
//! `EntityStore` task.

use crate::entity::StoreEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Filter applied to every record by [`StoreRequest::Find`].
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the store to request operations.
///
/// # The Collection Pattern
/// The variants map to the operations of a keyed collection:
///
/// - **List / Get / GetMany / Find**: reads. Misses are `None` or an empty list.
/// - **Insert**: adds a record; rejected if its id is blank or already present.
/// - **Replace**: overwrites every id-matching record in place, answering `None` if none matched.
/// - **Delete**: filters matching records out, answering whether anything was removed.
/// - **Action**: runs a [`StoreEntity::Action`] against the first matching record.
/// - **Seed**: populates the collection from [`StoreEntity::seed`] if it is empty.
pub enum StoreRequest<T: StoreEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: String,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<String>,
        respond_to: Response<Vec<T>>,
    },
    Find {
        predicate: Predicate<T>,
        respond_to: Response<Vec<T>>,
    },
    Insert {
        entity: T,
        respond_to: Response<T>,
    },
    Replace {
        entity: T,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: String,
        respond_to: Response<bool>,
    },
    Action {
        id: String,
        action: T::Action,
        respond_to: Response<Option<T::ActionResult>>,
    },
    Seed {
        respond_to: Response<usize>,
    },
}

impl<T: StoreEntity> fmt::Debug for StoreRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { .. } => f.write_str("List"),
            Self::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            Self::GetMany { ids, .. } => f.debug_struct("GetMany").field("ids", ids).finish(),
            Self::Find { .. } => f.write_str("Find"),
            Self::Insert { entity, .. } => {
                f.debug_struct("Insert").field("entity", entity).finish()
            }
            Self::Replace { entity, .. } => {
                f.debug_struct("Replace").field("entity", entity).finish()
            }
            Self::Delete { id, .. } => f.debug_struct("Delete").field("id", id).finish(),
            Self::Action { id, action, .. } => f
                .debug_struct("Action")
                .field("id", id)
                .field("action", action)
                .finish(),
            Self::Seed { .. } => f.write_str("Seed"),
        }
    }
}
