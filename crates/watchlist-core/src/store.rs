use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use watchlist_models::MovieCollection;
use crate::error::StoreError;

/// Whole-document JSON storage for the movie collection
///
/// Every call reads or rewrites the entire file. There is no file locking:
/// two processes saving concurrently race and the last rename wins.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_file: PathBuf,
}

impl JsonStore {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.data_file
    }

    pub fn exists(&self) -> bool {
        self.data_file.exists()
    }

    /// Load the collection from disk.
    ///
    /// Never fails: a missing, unreadable or unparsable file yields an empty
    /// collection. Unparsable content is copied to `<file>.bak` first so the
    /// next save does not destroy it.
    pub fn load(&self) -> MovieCollection {
        if !self.data_file.exists() {
            debug!("Movies file {:?} does not exist, starting empty", self.data_file);
            return MovieCollection::default();
        }

        let content = match std::fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read movies file {:?}: {}", self.data_file, e);
                return MovieCollection::default();
            }
        };

        if content.trim().is_empty() {
            return MovieCollection::default();
        }

        match serde_json::from_str::<MovieCollection>(&content) {
            Ok(collection) => {
                debug!("Loaded {} movies from {:?}", collection.len(), self.data_file);
                collection
            }
            Err(e) => {
                let backup_path = sibling_path(&self.data_file, ".bak");
                if let Err(backup_err) = std::fs::copy(&self.data_file, &backup_path) {
                    warn!(
                        "Movies file {:?} is unparsable ({}) and could not be backed up: {}. Starting empty.",
                        self.data_file, e, backup_err
                    );
                } else {
                    warn!(
                        "Movies file {:?} is unparsable ({}). Backed it up to {:?} and starting empty.",
                        self.data_file, e, backup_path
                    );
                }
                MovieCollection::default()
            }
        }
    }

    /// Serialize the full collection and replace the file.
    ///
    /// Writes to a temporary sibling and renames it over the target.
    pub fn save(&self, collection: &MovieCollection) -> Result<(), StoreError> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(collection)?;

        let temp_path = sibling_path(&self.data_file, ".tmp");
        std::fs::write(&temp_path, json).map_err(|source| StoreError::Io {
            path: temp_path.clone(),
            source,
        })?;
        std::fs::rename(&temp_path, &self.data_file).map_err(|source| StoreError::Io {
            path: self.data_file.clone(),
            source,
        })?;

        info!("Saved {} movies to {:?}", collection.len(), self.data_file);
        Ok(())
    }
}

/// `movies.json` -> `movies.json<suffix>` in the same directory
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("movies.json"));
    name.push(suffix);
    path.with_file_name(name)
}
