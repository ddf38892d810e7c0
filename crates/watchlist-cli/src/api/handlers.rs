use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use watchlist_models::{GenreMatches, ListQuery, Movie, MoviePage, MovieUpdate, NewMovie, SearchMatches};
use super::extract::{MovieBody, QueryPairs};
use super::{ApiError, AppState};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the movie watchlist API",
        "endpoints": {
            "getAllMovies": "GET /api/movies?page=1&limit=10&sortBy=addedDate&order=desc",
            "getMovieById": "GET /api/movies/:id",
            "addMovie": "POST /api/movies",
            "updateMovie": "PUT /api/movies/:id",
            "deleteMovie": "DELETE /api/movies/:id",
            "searchMovies": "GET /api/movies/search?query=...",
            "filterByGenre": "GET /api/movies/genre/:genre"
        }
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Raw values are parsed leniently by `ListQuery::from_raw`
pub async fn list_movies(
    State(state): State<AppState>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<MoviePage>, ApiError> {
    let Query(params) = params?;
    let query = ListQuery::from_raw(
        params.first("page"),
        params.first("limit"),
        params.first("sortBy"),
        params.first("order"),
        state.page_size,
    );
    Ok(Json(state.service.list(&query)))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    state
        .service
        .get(&id)
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to fetch movie"))
}

pub async fn create_movie(
    State(state): State<AppState>,
    MovieBody(input): MovieBody<NewMovie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let movie = state
        .service
        .create(input)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to add movie"))?;
    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    MovieBody(changes): MovieBody<MovieUpdate>,
) -> Result<Json<Movie>, ApiError> {
    state
        .service
        .update(&id, changes)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to update movie"))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state
        .service
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete movie"))?;
    Ok(Json(json!({ "message": "Movie deleted successfully" })))
}

pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Json<GenreMatches> {
    Json(state.service.by_genre(&genre))
}

pub async fn search_movies(
    State(state): State<AppState>,
    params: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<SearchMatches>, ApiError> {
    let Query(params) = params?;
    let query = params.first("query").or_else(|| params.first("q"));
    state
        .service
        .search(query.unwrap_or_default())
        .map(Json)
        .map_err(|e| ApiError::from_service(e, "Failed to search movies"))
}
