use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the listing backend.
///
/// The portal surfaces every variant as the same generic toast; the detail
/// only reaches the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
