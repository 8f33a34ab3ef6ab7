use thiserror::Error;

/// Failures talking to the users/todos API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{url} - {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("invalid json from {url}: {source}")]
    Deserialization {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// True for connect, timeout and non-2xx failures.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }
}

/// Failures of the durable key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not a json object of strings: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode storage file: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Failures restoring or persisting the session record.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("stored session is not a valid user record: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
