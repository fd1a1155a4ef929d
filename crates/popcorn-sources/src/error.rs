use thiserror::Error;

/// Failures a movie provider can report.
///
/// Cancellation is deliberately absent: a superseded request is dropped by
/// the caller and never turns into an error.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure or a non-success HTTP status
    #[error("request failed: {0}")]
    Network(String),

    /// The provider answered but reported no matching title
    #[error("no match: {0}")]
    NotFound(String),

    /// The body could not be read as the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Message shown to the user in place of the result list
    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderError::NotFound(_) => "Movie not found",
            ProviderError::Network(_) | ProviderError::Decode(_) => {
                "Something went wrong with fetching movies"
            }
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}
