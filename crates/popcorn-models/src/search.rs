use serde::{Deserialize, Serialize};

/// Lightweight record returned by a title search.
///
/// Replaced wholesale on every search; only `imdb_id` is used for selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultSummary {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
}
