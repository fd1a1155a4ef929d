pub mod error;
pub mod factory;
pub mod omdb;
pub mod traits;

pub use error::ProviderError;
pub use factory::create_provider;
pub use omdb::OmdbClient;
pub use traits::MovieProvider;
