pub mod error;
pub mod id;
pub mod repository;
pub mod service;
pub mod store;

pub use error::{RepositoryError, ServiceError, StoreError};
pub use id::{generate_id, generate_unique_id};
pub use service::MovieService;
pub use store::JsonStore;
