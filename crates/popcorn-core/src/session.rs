use popcorn_models::{MovieDetail, WatchedEntry};
use popcorn_sources::MovieProvider;
use std::sync::Arc;
use tracing::info;
use crate::detail::{DetailController, DetailState};
use crate::error::{CommitError, StoreError};
use crate::rating::RatingDraft;
use crate::request::Generation;
use crate::search::{QueryOutcome, SearchController, SearchState};
use crate::selection::{Selection, SelectionChange};
use crate::stats::{summarize, WatchedSummary};
use crate::store::WatchedList;

/// Title used while no movie is open
pub const DEFAULT_WINDOW_TITLE: &str = "UsePopcorn";

/// Whether the open movie is already in the watched list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    Unwatched,
    Watched { user_rating: u8 },
}

/// A loaded detail together with what the user can do with it
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub detail: MovieDetail,
    pub status: WatchStatus,
    /// Rating picked so far; only meaningful while unwatched
    pub draft_rating: Option<u8>,
}

/// One user's search → select → rate → add flow.
///
/// Owns the watched list; all mutations go through here.
pub struct Session {
    search: SearchController,
    selection: Selection,
    detail: DetailController,
    draft: RatingDraft,
    watched: WatchedList,
}

impl Session {
    pub fn new(provider: Arc<dyn MovieProvider>, watched: WatchedList, min_query_len: usize) -> Self {
        Self {
            search: SearchController::new(Arc::clone(&provider), min_query_len),
            selection: Selection::default(),
            detail: DetailController::new(provider),
            draft: RatingDraft::default(),
            watched,
        }
    }

    /// Change the query. A search that actually starts also closes the open movie.
    pub async fn set_query(&mut self, query: &str) -> QueryOutcome {
        let outcome = self.search.set_query(query).await;
        if let QueryOutcome::Searching(_) = outcome {
            self.close().await;
        }
        outcome
    }

    pub fn min_query_len(&self) -> usize {
        self.search.min_query_len()
    }

    pub async fn settle_search(&mut self) -> SearchState {
        self.search.settle().await;
        self.search.snapshot().await
    }

    pub async fn search_state(&self) -> SearchState {
        self.search.snapshot().await
    }

    /// Toggle the selected result. Opening a movie starts its detail fetch and
    /// resets the rating draft.
    pub async fn select(&mut self, imdb_id: &str) -> Option<Generation> {
        match self.selection.select(imdb_id) {
            SelectionChange::Opened(id) => {
                self.draft.reset();
                Some(self.detail.open(&id).await)
            }
            SelectionChange::Closed | SelectionChange::Unchanged => {
                self.draft.reset();
                self.detail.close().await;
                None
            }
        }
    }

    pub async fn close(&mut self) {
        self.selection.close();
        self.draft.reset();
        self.detail.close().await;
    }

    /// Stop all outstanding lookups; nothing in flight will be applied
    pub async fn shutdown(&mut self) {
        self.search.cancel().await;
        self.close().await;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.current()
    }

    pub async fn settle_detail(&mut self) -> DetailState {
        self.detail.settle().await;
        self.detail.snapshot().await
    }

    /// The open movie, once loaded, with its watched status
    pub async fn detail_view(&self) -> Option<DetailView> {
        let state = self.detail.snapshot().await;
        let detail = state.detail()?.clone();
        let status = match self.watched.get(&detail.imdb_id) {
            Some(entry) => WatchStatus::Watched { user_rating: entry.user_rating },
            None => WatchStatus::Unwatched,
        };

        Some(DetailView {
            detail,
            status,
            draft_rating: self.draft.rating(),
        })
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), CommitError> {
        self.draft.set(rating)
    }

    pub fn draft(&self) -> &RatingDraft {
        &self.draft
    }

    /// Add the open movie with the drafted rating, then close it.
    pub async fn commit(&mut self) -> Result<WatchedEntry, CommitError> {
        let state = self.detail.snapshot().await;
        let detail = state.detail().ok_or(CommitError::NoDetail)?;
        let rating = self.draft.rating().ok_or(CommitError::NoRating)?;

        if self.watched.contains(&detail.imdb_id) {
            return Err(CommitError::AlreadyWatched(detail.imdb_id.clone()));
        }

        let entry = WatchedEntry::from_detail(detail, rating, self.draft.decisions());
        self.watched.add(entry.clone())?;
        info!(
            imdb_id = %entry.imdb_id,
            title = %entry.title,
            rating = entry.user_rating,
            "Added movie to watched list"
        );

        self.close().await;
        Ok(entry)
    }

    /// Delete from the watched list; `false` when the id was not there
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool, StoreError> {
        let removed = self.watched.remove(imdb_id)?;
        if removed {
            info!(imdb_id = %imdb_id, "Removed movie from watched list");
        }
        Ok(removed)
    }

    pub fn watched(&self) -> &[WatchedEntry] {
        self.watched.all()
    }

    pub fn summary(&self) -> WatchedSummary {
        summarize(self.watched.all())
    }

    /// `Movie | <title>` while a loaded movie is open
    pub async fn window_title(&self) -> String {
        let state = self.detail.snapshot().await;
        match state.detail() {
            Some(detail) => format!("Movie | {}", detail.title),
            None => DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeyValueStore;
    use crate::testing::MemoryStore;
    use crate::testing::{catalog, FakeProvider};

    fn create_session(storage: MemoryStore) -> (Session, Arc<FakeProvider>) {
        let provider = Arc::new(FakeProvider::with_catalog(catalog()));
        let watched = WatchedList::load(Box::new(storage), "watched").unwrap();
        (Session::new(provider.clone(), watched, 3), provider)
    }

    async fn open(session: &mut Session, imdb_id: &str) {
        assert!(session.select(imdb_id).await.is_some());
        session.settle_detail().await;
    }

    #[tokio::test]
    async fn test_full_flow_adds_and_closes() {
        let storage = MemoryStore::new();
        let (mut session, _) = create_session(storage.clone());

        session.set_query("inception").await;
        let results = session.settle_search().await;
        assert_eq!(results.results().len(), 1);

        open(&mut session, "tt1375666").await;
        assert_eq!(session.window_title().await, "Movie | Inception");

        session.set_rating(7).unwrap();
        session.set_rating(9).unwrap();
        let entry = session.commit().await.unwrap();

        assert_eq!(entry.runtime, Some(148));
        assert_eq!(entry.imdb_rating, Some(8.8));
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.count_rating_decisions, Some(2));
        assert_eq!(session.selected(), None);
        assert_eq!(session.window_title().await, DEFAULT_WINDOW_TITLE);
        assert!(storage.get("watched").unwrap().unwrap().contains("tt1375666"));
    }

    #[tokio::test]
    async fn test_watched_movie_shows_stored_rating() {
        let (mut session, _) = create_session(MemoryStore::new());
        open(&mut session, "tt1375666").await;
        session.set_rating(8).unwrap();
        session.commit().await.unwrap();

        open(&mut session, "tt1375666").await;
        let view = session.detail_view().await.unwrap();
        assert_eq!(view.status, WatchStatus::Watched { user_rating: 8 });
    }

    #[tokio::test]
    async fn test_commit_rejects_already_watched() {
        let (mut session, _) = create_session(MemoryStore::new());
        open(&mut session, "tt0133093").await;
        session.set_rating(8).unwrap();
        session.commit().await.unwrap();

        open(&mut session, "tt0133093").await;
        session.set_rating(10).unwrap();
        let result = session.commit().await;

        assert!(matches!(result, Err(CommitError::AlreadyWatched(id)) if id == "tt0133093"));
        assert_eq!(session.watched().len(), 1);
        assert_eq!(session.watched()[0].user_rating, 8);
    }

    #[tokio::test]
    async fn test_commit_requires_detail_and_rating() {
        let (mut session, _) = create_session(MemoryStore::new());
        assert!(matches!(session.commit().await, Err(CommitError::NoDetail)));

        open(&mut session, "tt0816692").await;
        assert!(matches!(session.commit().await, Err(CommitError::NoRating)));
        assert!(session.watched().is_empty());
    }

    #[tokio::test]
    async fn test_unparseable_numbers_stored_as_unknown() {
        let (mut session, _) = create_session(MemoryStore::new());
        open(&mut session, "tt0000001").await;
        session.set_rating(5).unwrap();

        let entry = session.commit().await.unwrap();
        assert_eq!(entry.runtime, None);
        assert_eq!(entry.imdb_rating, None);

        let summary = session.summary();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.avg_imdb_rating, 0.0);
        assert_eq!(summary.avg_user_rating, 5.0);
    }

    #[tokio::test]
    async fn test_selecting_twice_closes_detail() {
        let (mut session, provider) = create_session(MemoryStore::new());
        open(&mut session, "tt1375666").await;

        assert!(session.select("tt1375666").await.is_none());
        assert_eq!(session.selected(), None);
        assert_eq!(session.detail.snapshot().await, DetailState::default());
        assert_eq!(provider.detail_calls(), 1);
    }

    #[tokio::test]
    async fn test_new_search_closes_detail_and_resets_draft() {
        let (mut session, _) = create_session(MemoryStore::new());
        open(&mut session, "tt1375666").await;
        session.set_rating(6).unwrap();

        session.set_query("matrix").await;
        assert_eq!(session.selected(), None);
        assert_eq!(session.draft().rating(), None);
        assert!(session.detail_view().await.is_none());
    }

    #[tokio::test]
    async fn test_short_query_keeps_detail_open() {
        let (mut session, _) = create_session(MemoryStore::new());
        open(&mut session, "tt1375666").await;

        assert_eq!(session.set_query("in").await, QueryOutcome::TooShort);
        assert_eq!(session.selected(), Some("tt1375666"));
    }

    #[tokio::test]
    async fn test_shutdown_discards_pending_search() {
        let (mut session, provider) = create_session(MemoryStore::new());
        let slow = provider.gate("matrix");

        session.set_query("matrix").await;
        provider.searches_started(1).await;
        session.shutdown().await;
        slow.notify_one();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let state = session.search_state().await;
        assert!(!state.status.is_loading());
        assert!(state.results().is_empty());
        assert_eq!(session.window_title().await, DEFAULT_WINDOW_TITLE);
    }

    #[tokio::test]
    async fn test_remove_and_summary() {
        let (mut session, _) = create_session(MemoryStore::new());
        for (id, rating) in [("tt1375666", 10), ("tt0133093", 9), ("tt0816692", 8)] {
            open(&mut session, id).await;
            session.set_rating(rating).unwrap();
            session.commit().await.unwrap();
        }

        assert!(session.remove("tt0133093").unwrap());
        assert!(!session.remove("tt0133093").unwrap());

        let ids: Vec<&str> = session.watched().iter().map(|e| e.imdb_id.as_str()).collect();
        assert_eq!(ids, vec!["tt1375666", "tt0816692"]);

        let summary = session.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.user_rating_display(), "9.0");
        assert_eq!(summary.avg_runtime, 159);
    }
}
