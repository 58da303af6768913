use thiserror::Error;

/// Failure talking to the task backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("failed to encode request for {endpoint}: {source}")]
    Encode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Raised by non-HTTP backends (fakes, embedded stores).
    #[error("{0}")]
    Backend(String),
}

/// Failure building or reading an import/export document.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid file format")]
    InvalidShape,
}

#[derive(Debug, Error)]
#[error("unknown filter `{0}` (expected all, active or completed)")]
pub struct ParseFilterError(pub String);
