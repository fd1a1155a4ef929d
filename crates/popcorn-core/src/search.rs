use popcorn_models::SearchResultSummary;
use popcorn_sources::MovieProvider;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::request::{Generation, LatestRequest, RequestState};

/// Snapshot of the search pane
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Query exactly as typed
    pub query: String,
    pub status: RequestState<Vec<SearchResultSummary>>,
}

impl SearchState {
    /// Current result list; empty while loading, on error, or for short queries
    pub fn results(&self) -> &[SearchResultSummary] {
        self.status.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }
}

/// What a query change did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Below the minimum length: results cleared, nothing sent
    TooShort,
    /// A lookup was issued and any earlier one cancelled
    Searching(Generation),
}

#[derive(Debug, Default)]
struct SearchInner {
    requests: LatestRequest,
    state: SearchState,
}

/// Keystroke-driven title search with at most one outstanding lookup.
///
/// Every query change aborts the previous lookup task; the generation check
/// under the state lock covers a lookup that finished just before the abort
/// landed, so a superseded result can never be written.
pub struct SearchController {
    provider: Arc<dyn MovieProvider>,
    min_query_len: usize,
    inner: Arc<Mutex<SearchInner>>,
    in_flight: Option<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(provider: Arc<dyn MovieProvider>, min_query_len: usize) -> Self {
        Self {
            provider,
            min_query_len,
            inner: Arc::new(Mutex::new(SearchInner::default())),
            in_flight: None,
        }
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// React to a changed query. Call on every change; the lookup itself runs
    /// in the background, use [`SearchController::settle`] to wait for it.
    pub async fn set_query(&mut self, query: &str) -> QueryOutcome {
        self.cancel_in_flight();

        let trimmed = query.trim().to_string();
        let mut inner = self.inner.lock().await;
        inner.state.query = query.to_string();

        if trimmed.chars().count() < self.min_query_len {
            inner.requests.invalidate();
            inner.state.status = RequestState::Idle;
            debug!(query = %trimmed, "Query below minimum length, skipping search");
            return QueryOutcome::TooShort;
        }

        let generation = inner.requests.begin();
        inner.state.status = RequestState::Loading;
        drop(inner);

        let provider = Arc::clone(&self.provider);
        let shared = Arc::clone(&self.inner);
        self.in_flight = Some(tokio::spawn(async move {
            let result = provider.search(&trimmed).await;

            let mut inner = shared.lock().await;
            if !inner.requests.is_current(generation) {
                debug!(query = %trimmed, "Discarding superseded search result");
                return;
            }

            inner.state.status = match result {
                Ok(results) => {
                    info!(query = %trimmed, count = results.len(), "Search completed");
                    RequestState::Success(results)
                }
                Err(e) => {
                    warn!(query = %trimmed, error = %e, "Search failed");
                    RequestState::Failure(e.user_message().to_string())
                }
            };
        }));

        QueryOutcome::Searching(generation)
    }

    /// Wait for the outstanding lookup, if any, to finish
    pub async fn settle(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    warn!("Search task panicked: {}", e);
                }
            }
        }
    }

    pub async fn snapshot(&self) -> SearchState {
        self.inner.lock().await.state.clone()
    }

    /// Drop the outstanding lookup; its result will never be applied
    pub async fn cancel(&mut self) {
        self.cancel_in_flight();
        let mut inner = self.inner.lock().await;
        inner.requests.invalidate();
        if inner.state.status.is_loading() {
            inner.state.status = RequestState::Idle;
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
