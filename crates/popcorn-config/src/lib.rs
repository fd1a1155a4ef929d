pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, OmdbConfig, SearchConfig, StorageConfig, DEFAULT_MIN_QUERY_LEN, DEFAULT_OMDB_BASE_URL, DEFAULT_WATCHED_KEY};
pub use credentials::{CredentialStore, OMDB_API_KEY_ENV};
pub use paths::PathManager;
