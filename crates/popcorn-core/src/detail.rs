use popcorn_models::MovieDetail;
use popcorn_sources::MovieProvider;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::request::{Generation, LatestRequest, RequestState};

/// Snapshot of the detail pane
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    /// Id the pane is showing (or loading)
    pub imdb_id: Option<String>,
    pub status: RequestState<MovieDetail>,
}

impl DetailState {
    pub fn detail(&self) -> Option<&MovieDetail> {
        self.status.value()
    }
}

#[derive(Debug, Default)]
struct DetailInner {
    requests: LatestRequest,
    state: DetailState,
}

/// Fetches the full record for the selected result.
///
/// Earlier fetches are not aborted when the selection moves on; they run to
/// completion and are dropped unless their id and generation still match.
pub struct DetailController {
    provider: Arc<dyn MovieProvider>,
    inner: Arc<Mutex<DetailInner>>,
    latest: Option<JoinHandle<()>>,
}

impl DetailController {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            inner: Arc::new(Mutex::new(DetailInner::default())),
            latest: None,
        }
    }

    /// Start loading `imdb_id`. Always issues a fresh request, even when the
    /// same id was just shown.
    pub async fn open(&mut self, imdb_id: &str) -> Generation {
        let mut inner = self.inner.lock().await;
        let generation = inner.requests.begin();
        inner.state = DetailState {
            imdb_id: Some(imdb_id.to_string()),
            status: RequestState::Loading,
        };
        drop(inner);

        let provider = Arc::clone(&self.provider);
        let shared = Arc::clone(&self.inner);
        let imdb_id = imdb_id.to_string();
        self.latest = Some(tokio::spawn(async move {
            let result = provider.fetch_detail(&imdb_id).await;

            let mut inner = shared.lock().await;
            let still_selected = inner.state.imdb_id.as_deref() == Some(imdb_id.as_str());
            if !inner.requests.is_current(generation) || !still_selected {
                debug!(imdb_id = %imdb_id, "Discarding stale detail response");
                return;
            }

            inner.state.status = match result {
                Ok(detail) => {
                    info!(imdb_id = %imdb_id, title = %detail.title, "Loaded movie details");
                    RequestState::Success(detail)
                }
                Err(e) => {
                    warn!(imdb_id = %imdb_id, error = %e, "Failed to load movie details");
                    RequestState::Failure(e.user_message().to_string())
                }
            };
        }));

        generation
    }

    /// Clear the pane; any fetch still running is ignored when it lands
    pub async fn close(&mut self) {
        let mut inner = self.inner.lock().await;
        inner.requests.invalidate();
        inner.state = DetailState::default();
    }

    /// Wait for the most recent fetch to finish
    pub async fn settle(&mut self) {
        if let Some(handle) = self.latest.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    warn!("Detail task panicked: {}", e);
                }
            }
        }
    }

    pub async fn snapshot(&self) -> DetailState {
        self.inner.lock().await.state.clone()
    }
}

impl Drop for DetailController {
    fn drop(&mut self) {
        if let Some(handle) = self.latest.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catalog, FakeProvider};
    use std::time::Duration;

    #[tokio::test]
    async fn test_open_loads_detail() {
        let provider = Arc::new(FakeProvider::with_catalog(catalog()));
        let mut details = DetailController::new(provider);

        details.open("tt1375666").await;
        assert!(details.snapshot().await.status.is_loading());
        details.settle().await;

        let state = details.snapshot().await;
        assert_eq!(state.imdb_id.as_deref(), Some("tt1375666"));
        assert_eq!(state.detail().map(|d| d.title.as_str()), Some("Inception"));
    }

    #[tokio::test]
    async fn test_stale_response_does_not_replace_current_detail() {
        let provider = Arc::new(FakeProvider::with_catalog(catalog()));
        let slow = provider.gate("tt1375666");
        let mut details = DetailController::new(provider.clone());

        details.open("tt1375666").await;
        details.open("tt0133093").await;
        details.settle().await;

        slow.notify_one();
        tokio::time::sleep(Duration::from_millis(20)).await;

        let state = details.snapshot().await;
        assert_eq!(state.imdb_id.as_deref(), Some("tt0133093"));
        assert_eq!(state.detail().map(|d| d.title.as_str()), Some("The Matrix"));
        // Both requests went out; only the stale one was dropped
        assert_eq!(provider.detail_calls(), 2);
    }

    #[tokio::test]
    async fn test_reopening_same_id_fetches_again() {
        let provider = Arc::new(FakeProvider::with_catalog(catalog()));
        let mut details = DetailController::new(provider.clone());

        details.open("tt0816692").await;
        details.settle().await;
        details.open("tt0816692").await;
        details.settle().await;

        assert_eq!(provider.detail_calls(), 2);
        assert!(details.snapshot().await.detail().is_some());
    }

    #[tokio::test]
    async fn test_close_ignores_late_response() {
        let provider = Arc::new(FakeProvider::with_catalog(catalog()));
        let slow = provider.gate("tt1375666");
        let mut details = DetailController::new(provider);

        details.open("tt1375666").await;
        details.close().await;
        slow.notify_one();
        details.settle().await;

        assert_eq!(details.snapshot().await, DetailState::default());
    }

    #[tokio::test]
    async fn test_unknown_id_reports_error() {
        let provider = Arc::new(FakeProvider::with_catalog(catalog()));
        let mut details = DetailController::new(provider);

        details.open("tt9999999").await;
        details.settle().await;

        let state = details.snapshot().await;
        assert_eq!(state.status.error(), Some("Movie not found"));
        assert!(state.detail().is_none());
    }
}
