use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use watchlist_config::{Config, PathManager};
use watchlist_models::{
    GenreMatches, ListQuery, Movie, MovieDefaults, MoviePage, MovieUpdate, NewMovie, SearchMatches,
};
use crate::error::ServiceError;
use crate::id::generate_unique_id;
use crate::repository;
use crate::store::JsonStore;

/// Load-mutate-save front end over the repository operations
///
/// The collection is read fresh from disk for every call; nothing is cached
/// between requests. Mutations are serialized through `write_lock`, so
/// concurrent requests in this process cannot lose each other's writes.
/// Other processes sharing the file still race.
pub struct MovieService {
    store: JsonStore,
    defaults: MovieDefaults,
    write_lock: Mutex<()>,
}

impl MovieService {
    pub fn new(store: JsonStore, defaults: MovieDefaults) -> Self {
        Self {
            store,
            defaults,
            write_lock: Mutex::new(()),
        }
    }

    pub fn from_config(config: &Config, paths: &PathManager) -> Self {
        Self::new(JsonStore::new(config.data_file(paths)), config.movie_defaults())
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    pub fn list(&self, query: &ListQuery) -> MoviePage {
        let collection = self.store.load();
        repository::list_movies(&collection, query)
    }

    pub fn get(&self, id: &str) -> Result<Movie, ServiceError> {
        let collection = self.store.load();
        Ok(repository::find_movie(&collection, id)?.clone())
    }

    pub fn by_genre(&self, genre: &str) -> GenreMatches {
        let collection = self.store.load();
        repository::movies_by_genre(&collection, genre)
    }

    pub fn search(&self, query: &str) -> Result<SearchMatches, ServiceError> {
        let collection = self.store.load();
        Ok(repository::search_movies(&collection, query)?)
    }

    pub async fn create(&self, input: NewMovie) -> Result<Movie, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load();
        let id = generate_unique_id(&collection);
        let movie = repository::create_movie(&mut collection, input, &self.defaults, id, Utc::now())?;
        self.store.save(&collection)?;
        info!(id = %movie.id, title = %movie.title, "Movie added");
        Ok(movie)
    }

    pub async fn update(&self, id: &str, changes: MovieUpdate) -> Result<Movie, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load();
        let movie = repository::update_movie(&mut collection, id, changes, Utc::now())?;
        self.store.save(&collection)?;
        debug!(id = %movie.id, "Movie updated");
        Ok(movie)
    }

    pub async fn delete(&self, id: &str) -> Result<Movie, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut collection = self.store.load();
        let movie = repository::delete_movie(&mut collection, id)?;
        self.store.save(&collection)?;
        info!(id = %movie.id, title = %movie.title, "Movie deleted");
        Ok(movie)
    }
}
