pub mod config;
pub mod paths;

pub use config::{Config, DefaultsConfig, LoggingConfig, ServerConfig, StorageConfig};
pub use paths::{PathManager, container_base_path};
