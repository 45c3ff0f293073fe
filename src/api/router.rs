use super::error::panic_response;
use super::{actor_controller, movie_controller, ApiError, AppState};
use axum::{
    http::{Method, Uri},
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// The route table, without state or middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/actor/GetAll", get(actor_controller::get_all))
        .route("/api/actor/GetById/{id}", get(actor_controller::get_by_id))
        .route("/api/actor/GetByIds", get(actor_controller::get_by_ids))
        .route("/api/actor/Create", post(actor_controller::create))
        .route("/api/actor/Update/{id}", put(actor_controller::update))
        .route(
            "/api/actor/LinkMovies/{id}",
            patch(actor_controller::link_movies),
        )
        .route("/api/actor/Delete/{id}", delete(actor_controller::delete))
        .route("/api/actor/error", get(actor_controller::error))
        .route("/api/movie/GetAll", get(movie_controller::get_all))
        .route("/api/movie/GetById/{id}", get(movie_controller::get_by_id))
        .route("/api/movie/GetByIds", get(movie_controller::get_by_ids))
        .route("/api/movie/Create", post(movie_controller::create))
        .route("/api/movie/Update/{id}", put(movie_controller::update))
        .route(
            "/api/movie/LinkActors/{id}",
            patch(movie_controller::link_actors),
        )
        .route("/api/movie/Delete/{id}", delete(movie_controller::delete))
        .route("/api/movie/error", get(movie_controller::error))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Adds panic recovery and request tracing to `routes`, then binds the state.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The complete application router.
pub fn app(state: AppState) -> Router {
    with_middleware(routes(), state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} is not allowed on {}", uri.path()))
}
