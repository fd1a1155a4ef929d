use crate::error::ProviderError;
use crate::omdb::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use popcorn_config::OmdbConfig;
use popcorn_models::{MovieDetail, SearchResultSummary};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Build the shared HTTP client; falls back to reqwest defaults if the builder fails.
/// Without a timeout a request only ends when it completes or its task is aborted.
pub fn create_omdb_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder().user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn from_config(config: &OmdbConfig, api_key: String) -> Self {
        Self {
            client: Arc::new(create_omdb_client(config.timeout_seconds.map(Duration::from_secs))),
            api_key,
            base_url: config.base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the API key
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MovieProvider for OmdbClient {
    fn provider_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, ProviderError> {
        api::search_titles(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, ProviderError> {
        api::get_title(&self.client, &self.base_url, &self.api_key, imdb_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_uses_configured_base_url() {
        let config = OmdbConfig {
            base_url: "https://omdb.example.com/".to_string(),
            timeout_seconds: Some(5),
        };
        let client = OmdbClient::from_config(&config, "key".to_string());
        assert_eq!(client.base_url(), "https://omdb.example.com/");
        assert_eq!(client.provider_name(), "omdb");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = OmdbConfig {
            base_url: "http://localhost:9999/".to_string(),
            timeout_seconds: None,
        };
        let client = OmdbClient::from_config(&config, "super-secret".to_string());
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("localhost:9999"));
    }
}
