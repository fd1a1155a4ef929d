use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultSummary};
use crate::error::ProviderError;

/// Remote movie database the engine searches and fetches details from.
///
/// Implementations must be cheap to share behind an `Arc`: the engine spawns
/// one task per lookup and hands each a clone of the handle.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Title search. An empty match set is reported as `ProviderError::NotFound`,
    /// so `Ok` always carries at least one result.
    async fn search(&self, query: &str) -> Result<Vec<SearchResultSummary>, ProviderError>;

    /// Full record for one title id.
    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, ProviderError>;
}
