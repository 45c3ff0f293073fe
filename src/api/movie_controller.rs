use super::{check_body_id, ids_from_query, required_id, ApiError, AppState};
use crate::model::{today, Actor, Movie, MovieInput};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use entity_framework::EntityRepository;
use tracing::info;

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Movie {id} not found"))
}

/// `GET /api/movie/GetAll`, through the resilient executor.
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.executor.execute(|| state.movies.get_all()).await?;
    Ok(Json(movies))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let id = required_id(&id)?;
    state
        .movies
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn get_by_ids(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let Query(pairs) = query?;
    let ids = ids_from_query(pairs);
    if ids.is_empty() {
        return Err(ApiError::BadRequest("At least one id is required".to_string()));
    }
    Ok(Json(state.movies.get_by_ids(&ids).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let movie = input.into_new_movie(today())?;
    let movie = state.movies.insert(movie).await?;

    info!(id = %movie.id, "Movie created");
    let location = format!("api/movie/{}", movie.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(movie)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> Result<Json<Movie>, ApiError> {
    let id = required_id(&id)?;
    let Json(input) = body?;
    check_body_id(id, input.id.as_deref())?;

    let existing = state.movies.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    let movie = input.merge_into(&existing, today())?;

    state
        .movies
        .replace(movie)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// `PATCH /api/movie/LinkActors/{id}`: appends the ids that name existing actors and
/// answers with those actors.
pub async fn link_actors(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<Json<Vec<Actor>>, ApiError> {
    let id = required_id(&id)?;
    let Json(actor_ids) = body?;
    if actor_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one actor id is required".to_string(),
        ));
    }

    if state.movies.get_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }
    let actors = state.actors.get_by_ids(&actor_ids).await?;
    let linked: Vec<String> = actors.iter().map(|a| a.id.clone()).collect();

    if !state.movies.link_actors(id, linked).await? {
        return Err(not_found(id));
    }
    info!(%id, linked = actors.len(), "Actors linked");
    Ok(Json(actors))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = required_id(&id)?;
    if !state.movies.delete(id).await? {
        return Err(not_found(id));
    }
    info!(%id, "Movie deleted");
    Ok(StatusCode::OK)
}

/// Always fails; exercises the 500 path.
pub async fn error() -> Result<StatusCode, ApiError> {
    Err(ApiError::Internal("Test exception".to_string()))
}
