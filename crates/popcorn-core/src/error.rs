use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("stored data for key '{key}' is not a valid watched list: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize watched list: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Reasons an "add to list" is refused
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("no movie details are open")]
    NoDetail,

    #[error("pick a rating before adding the movie")]
    NoRating,

    #[error("rating must be between 1 and {max}, got {rating}")]
    InvalidRating { rating: u8, max: u8 },

    #[error("{0} is already in your watched list")]
    AlreadyWatched(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
