//! Provider construction from configuration
//!
//! Keeps the CLI free of provider-specific wiring: it hands over the loaded
//! config and credentials and gets back a shareable provider handle.

use anyhow::Result;
use popcorn_config::{Config, CredentialStore, OMDB_API_KEY_ENV};
use std::sync::Arc;
use tracing::debug;
use crate::omdb::OmdbClient;
use crate::traits::MovieProvider;

/// Create the configured movie provider
pub fn create_provider(config: &Config, credentials: &CredentialStore) -> Result<Arc<dyn MovieProvider>> {
    config.validate()?;

    let api_key = credentials.resolve_omdb_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OMDb API key configured. Run 'popcorn config api-key' or set {}",
            OMDB_API_KEY_ENV
        )
    })?;

    let client = OmdbClient::from_config(&config.omdb, api_key);
    debug!(provider = "omdb", base_url = %client.base_url(), "Created movie provider");
    Ok(Arc::new(client))
}
