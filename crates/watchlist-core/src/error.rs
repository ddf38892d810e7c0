use std::path::PathBuf;
use thiserror::Error;

/// Failures writing the movies document. Reads never fail; see `JsonStore::load`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize movie collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{0}")]
    Validation(String),

    #[error("movie not found: {0}")]
    NotFound(String),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("movie not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Validation(msg) => ServiceError::Validation(msg),
            RepositoryError::NotFound(id) => ServiceError::NotFound(id),
        }
    }
}
