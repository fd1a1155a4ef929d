pub mod detail;
pub mod search;
pub mod watched;

pub use detail::MovieDetail;
pub use search::SearchResultSummary;
pub use watched::WatchedEntry;
