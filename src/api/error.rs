//! Error-to-JSON mapping for every non-2xx response.
//!
//! All errors share one body shape, [`ErrorResponse`]. Client errors carry the status
//! reason as `message` and the error text as `details`; anything unclassified becomes a
//! 500 through [`InternalServerError`], which logs the raw error.

use crate::actor_store::ActorError;
use crate::model::ValidationError;
use crate::movie_store::MovieError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resilience::ResilienceError;
use serde::Serialize;
use std::any::Any;
use std::fmt::Display;
use thiserror::Error;

/// Message sent with every 500.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error. Please try again later.";

/// JSON body of an error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub details: String,
}

/// Errors returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed input: blank id, id mismatch, empty id list, unreadable body.
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error(transparent)]
    Actor(#[from] ActorError),
    #[error(transparent)]
    Movie(#[from] MovieError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::Validation(_)
            | Self::Actor(ActorError::AlreadyExists(_))
            | Self::Movie(MovieError::AlreadyExists(_)) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Actor(_) | Self::Movie(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// An open circuit is not classified, so it surfaces as a 500.
impl<E> From<ResilienceError<E>> for ApiError
where
    E: Into<ApiError> + Display,
{
    fn from(err: ResilienceError<E>) -> Self {
        match err {
            ResilienceError::Operation(e) => e.into(),
            open @ ResilienceError::CircuitOpen { .. } => ApiError::Internal(open.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            return InternalServerError(self).into_response();
        }

        tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        error_response(
            status,
            status.canonical_reason().unwrap_or("Error"),
            self.to_string(),
        )
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error and sends the generic message with the error text as `details`.
pub struct InternalServerError<E>(pub E);

impl<E: Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_ERROR_MESSAGE,
            self.0.to_string(),
        )
    }
}

fn error_response(status: StatusCode, message: &str, details: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            status_code: status.as_u16(),
            message: message.to_string(),
            details,
        }),
    )
        .into_response()
}

/// Turns a handler panic into the standard 500 body.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    InternalServerError(details).into_response()
}
