pub mod detail;
pub mod error;
pub mod rating;
pub mod request;
pub mod search;
pub mod selection;
pub mod session;
pub mod stats;
pub mod store;

#[cfg(test)]
mod testing;

pub use detail::{DetailController, DetailState};
pub use error::{CommitError, StoreError};
pub use rating::{RatingDraft, MAX_RATING};
pub use request::{Generation, LatestRequest, RequestState};
pub use search::{QueryOutcome, SearchController, SearchState};
pub use selection::{Selection, SelectionChange};
pub use session::{DetailView, Session, WatchStatus, DEFAULT_WINDOW_TITLE};
pub use stats::{format_significant, summarize, WatchedSummary};
pub use store::{JsonFileStore, KeyValueStore, WatchedList};
