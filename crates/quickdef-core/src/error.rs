/// Failure of a single remote attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Nothing was attempted, the last remote call had already failed
    #[error("No internet connection")]
    Offline,

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Word not found: {0}")]
    NotFound(String),

    #[error("Invalid word: {0:?}")]
    InvalidWord(String),
}
