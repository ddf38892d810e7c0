mod error;
mod extract;
mod handlers;
mod middleware;

use axum::handler::HandlerWithoutStateExt;
use axum::routing::{get, get_service};
use axum::Router;
use std::sync::Arc;
use tower::Layer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};
use watchlist_config::ServerConfig;
use watchlist_core::MovieService;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MovieService>,
    pub page_size: usize,
}

impl AppState {
    pub fn new(service: Arc<MovieService>, page_size: usize) -> Self {
        Self { service, page_size }
    }
}

/// The served application: the router behind trailing-slash normalization,
/// so `/api/movies/` and `/api/movies/:id/` reach the same handlers.
pub type App = NormalizePath<Router>;

/// Build the full application: movie API under `/api/movies`, endpoint
/// description at `/` (unless the static directory provides an index.html),
/// static files, and the JSON 404 fallback.
///
/// A request whose method has no handler on a known path falls through to the
/// same 404 as an unknown path.
pub fn router(state: AppState, server: &ServerConfig) -> App {
    let movies = Router::new()
        .route(
            "/",
            get(handlers::list_movies)
                .post(handlers::create_movie)
                .fallback(handlers::not_found),
        )
        .route("/search", get(handlers::search_movies).fallback(handlers::not_found))
        .route("/genre/:genre", get(handlers::movies_by_genre).fallback(handlers::not_found))
        .route(
            "/:id",
            get(handlers::get_movie)
                .put(handlers::update_movie)
                .delete(handlers::delete_movie)
                .fallback(handlers::not_found),
        );

    let root = match &server.static_dir {
        Some(dir) if dir.join("index.html").is_file() => get_service(ServeFile::new(dir.join("index.html"))),
        _ => get(handlers::index),
    };

    let app = Router::new()
        .route("/", root.fallback(handlers::not_found))
        .route("/api", get(handlers::index).fallback(handlers::not_found))
        .nest("/api/movies", movies);

    let app = match &server.static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(handlers::not_found.into_service()),
        ),
        None => app.fallback(handlers::not_found),
    };

    let app = app
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            server.max_body_bytes,
            middleware::log_requests,
        ))
        .layer(CatchPanicLayer::custom(error::panic_response));

    let app = if server.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    NormalizePathLayer::trim_trailing_slash().layer(app)
}
