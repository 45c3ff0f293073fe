//! # Mock Store & Testing Guide
//!
//! The `MockClient<T>` hands out a real [`StoreClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running [`EntityStore`](crate::EntityStore).
//! It lets repository logic (uniqueness checks, link bookkeeping, error mapping) be
//! tested without spawning a store, and makes failures easy to inject.
//!
//! ## When to use Mocks vs a Real Store
//!
//! | Feature | MockClient | Real Store |
//! |---------|------------|------------|
//! | **State** | No real state (expectations) | Real collection |
//! | **Use Case** | Logic *around* the client | The store itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use entity_framework::mock::MockClient;
//! use entity_framework::{FrameworkError, StoreEntity};
//!
//! #[derive(Clone, Debug, PartialEq)] struct Tag { id: String }
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! impl StoreEntity for Tag {
//!     type Action = (); type ActionResult = (); type Error = TagError;
//!     fn id(&self) -> &str { &self.id }
//!     fn apply_replace(&mut self, _: Self) -> Result<(), TagError> { Ok(()) }
//!     fn handle_action(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get().return_err(FrameworkError::StoreClosed);
//!
//!     let result = client.get("t1".into()).await;
//!     assert!(matches!(result, Err(FrameworkError::StoreClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Find Expectations
//!
//! `expect_find().return_ok(candidates)` answers with the candidates that pass the
//! predicate sent by the caller, so the predicate itself is exercised by the test.
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_client`] to get a client and the raw receiver when a test needs to
//! inspect the request payload (see [`expect_action`]).

use crate::client::StoreClient;
use crate::entity::StoreEntity;
use crate::error::FrameworkError;
use crate::message::{Response, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request to the mock client and the answer to give it.
enum Expectation<T: StoreEntity> {
    List(Result<Vec<T>, FrameworkError>),
    Get(Result<Option<T>, FrameworkError>),
    GetMany(Result<Vec<T>, FrameworkError>),
    Find(Result<Vec<T>, FrameworkError>),
    Insert(Option<FrameworkError>),
    Replace(Result<Option<T>, FrameworkError>),
    Delete(Result<bool, FrameworkError>),
    Action(Result<Option<T::ActionResult>, FrameworkError>),
}

impl<T: StoreEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "List",
            Self::Get(_) => "Get",
            Self::GetMany(_) => "GetMany",
            Self::Find(_) => "Find",
            Self::Insert(_) => "Insert",
            Self::Replace(_) => "Replace",
            Self::Delete(_) => "Delete",
            Self::Action(_) => "Action",
        }
    }
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation (or arrives when none is left) panics inside the mock task and the
/// caller sees [`FrameworkError::StoreDropped`].
pub struct MockClient<T: StoreEntity> {
    client: StoreClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoreEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoreEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();
                answer(request, expectation);
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, Expectation::List)
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, Expectation::Get)
    }

    pub fn expect_get_many(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, Expectation::GetMany)
    }

    /// The answer is filtered through the caller's predicate before it is sent.
    pub fn expect_find(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, Expectation::Find)
    }

    /// Inserts echo the entity back unless an error is queued with `return_err`.
    pub fn expect_insert(&mut self) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(&self.expectations, |result: Result<(), FrameworkError>| {
            Expectation::Insert(result.err())
        })
    }

    pub fn expect_replace(&mut self) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, Expectation::Replace)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<'_, T, bool> {
        ExpectationBuilder::new(&self.expectations, Expectation::Delete)
    }

    pub fn expect_action(&mut self) -> ExpectationBuilder<'_, T, Option<T::ActionResult>> {
        ExpectationBuilder::new(&self.expectations, Expectation::Action)
    }

    /// Asserts that every queued expectation was consumed.
    pub fn verify(&self) {
        let remaining: Vec<&'static str> = self
            .expectations
            .lock()
            .unwrap()
            .iter()
            .map(Expectation::name)
            .collect();
        assert!(
            remaining.is_empty(),
            "Unmet mock expectations: {:?}",
            remaining
        );
    }
}

/// Builder returned by the `expect_*` methods; queues the answer on `return_ok` / `return_err`.
pub struct ExpectationBuilder<'a, T: StoreEntity, R> {
    expectations: &'a Expectations<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: StoreEntity, R> ExpectationBuilder<'a, T, R> {
    fn new(
        expectations: &'a Expectations<T>,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            expectations,
            wrap: Box::new(wrap),
        }
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(result);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

fn reply<R>(respond_to: Response<R>, result: Result<R, FrameworkError>) {
    let _ = respond_to.send(result);
}

fn answer<T: StoreEntity>(request: StoreRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (StoreRequest::List { respond_to }, Some(Expectation::List(result))) => {
            reply(respond_to, result)
        }
        (StoreRequest::Get { respond_to, .. }, Some(Expectation::Get(result))) => {
            reply(respond_to, result)
        }
        (StoreRequest::GetMany { respond_to, .. }, Some(Expectation::GetMany(result))) => {
            reply(respond_to, result)
        }
        (
            StoreRequest::Find {
                predicate,
                respond_to,
            },
            Some(Expectation::Find(result)),
        ) => reply(
            respond_to,
            result.map(|candidates| candidates.into_iter().filter(|c| predicate(c)).collect()),
        ),
        (StoreRequest::Insert { entity, respond_to }, Some(Expectation::Insert(error))) => {
            reply(respond_to, error.map_or(Ok(entity), Err))
        }
        (StoreRequest::Replace { respond_to, .. }, Some(Expectation::Replace(result))) => {
            reply(respond_to, result)
        }
        (StoreRequest::Delete { respond_to, .. }, Some(Expectation::Delete(result))) => {
            reply(respond_to, result)
        }
        (StoreRequest::Action { respond_to, .. }, Some(Expectation::Action(result))) => {
            reply(respond_to, result)
        }
        (request, Some(expectation)) => panic!(
            "Unexpected request {:?}, expected {}",
            request,
            expectation.name()
        ),
        (request, None) => panic!("Unexpected request {:?}, no expectations left", request),
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client paired with the raw request receiver.
pub fn create_mock_client<T: StoreEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Waits for the next request and returns its parts if it is an `Action`.
pub async fn expect_action<T: StoreEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(String, T::Action, Response<Option<T::ActionResult>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
