use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use watchlist_models::{MovieDefaults, DEFAULT_PAGE_SIZE};
use crate::paths::PathManager;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for paths that match no API route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub cors: bool,
    /// Upper bound on buffered POST/PUT bodies
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Defaults to `<data_dir>/movies.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_genre")]
    pub genre: String,
    #[serde(default = "default_director")]
    pub director: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON (true) or plain (false) output; unset detects from the terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    /// Explicit log file; implies `to_file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Log to `<log_dir>/watchlist.log` when no explicit file is set
    #[serde(default)]
    pub to_file: bool,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_genre() -> String {
    MovieDefaults::default().genre
}

fn default_director() -> String {
    MovieDefaults::default().director
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
            cors: default_true(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            genre: default_genre(),
            director: default_director(),
            page_size: default_page_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
            to_file: false,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(anyhow::anyhow!("server.host cannot be empty"));
        }
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("server.port must be between 1 and 65535"));
        }
        if self.server.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("server.max_body_bytes must be greater than zero"));
        }
        if self.defaults.page_size == 0 {
            return Err(anyhow::anyhow!("defaults.page_size must be greater than zero"));
        }
        if self.defaults.genre.trim().is_empty() {
            return Err(anyhow::anyhow!("defaults.genre cannot be empty"));
        }
        if self.defaults.director.trim().is_empty() {
            return Err(anyhow::anyhow!("defaults.director cannot be empty"));
        }
        if let Some(dir) = &self.server.static_dir {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!("server.static_dir {} is not a directory", dir.display()));
            }
        }

        Ok(())
    }

    /// Resolved location of the movies document
    pub fn data_file(&self, paths: &PathManager) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| paths.default_data_file())
    }

    /// Resolved log file, or `None` to log to stderr
    pub fn log_file(&self, paths: &PathManager) -> Option<PathBuf> {
        match &self.logging.file {
            Some(file) => Some(file.clone()),
            None if self.logging.to_file => Some(paths.default_log_file()),
            None => None,
        }
    }

    pub fn movie_defaults(&self) -> MovieDefaults {
        MovieDefaults {
            genre: self.defaults.genre.clone(),
            director: self.defaults.director.clone(),
        }
    }
}
