use super::{check_body_id, ids_from_query, required_id, ApiError, AppState};
use crate::model::{today, Actor, ActorInput, Movie};
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
    ApiError::NotFound(format!("Actor {id} not found"))
}

/// `GET /api/actor/GetAll`, through the resilient executor.
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<Actor>>, ApiError> {
    let actors = state.executor.execute(|| state.actors.get_all()).await?;
    Ok(Json(actors))
}

pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Actor>, ApiError> {
    let id = required_id(&id)?;
    state
        .actors
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn get_by_ids(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Actor>>, ApiError> {
    let Query(pairs) = query?;
    let ids = ids_from_query(pairs);
    if ids.is_empty() {
        return Err(ApiError::BadRequest("At least one id is required".to_string()));
    }
    Ok(Json(state.actors.get_by_ids(&ids).await?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ActorInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = body?;
    let actor = input.into_new_actor(today())?;
    let actor = state.actors.insert(actor).await?;

    info!(id = %actor.id, "Actor created");
    let location = format!("api/actor/{}", actor.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(actor)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ActorInput>, JsonRejection>,
) -> Result<Json<Actor>, ApiError> {
    let id = required_id(&id)?;
    let Json(input) = body?;
    check_body_id(id, input.id.as_deref())?;

    let existing = state.actors.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    let actor = input.merge_into(&existing, today())?;

    state
        .actors
        .replace(actor)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// `PATCH /api/actor/LinkMovies/{id}`: appends the ids that name existing movies and
/// answers with those movies.
pub async fn link_movies(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let id = required_id(&id)?;
    let Json(movie_ids) = body?;
    if movie_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one movie id is required".to_string(),
        ));
    }

    if state.actors.get_by_id(id).await?.is_none() {
        return Err(not_found(id));
    }
    let movies = state.movies.get_by_ids(&movie_ids).await?;
    let linked: Vec<String> = movies.iter().map(|m| m.id.clone()).collect();

    if !state.actors.link_movies(id, linked).await? {
        return Err(not_found(id));
    }
    info!(%id, linked = movies.len(), "Movies linked");
    Ok(Json(movies))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = required_id(&id)?;
    if !state.actors.delete(id).await? {
        return Err(not_found(id));
    }
    info!(%id, "Actor deleted");
    Ok(StatusCode::OK)
}

/// Always fails; exercises the 500 path.
pub async fn error() -> Result<StatusCode, ApiError> {
    Err(ApiError::Internal("Test exception".to_string()))
}
