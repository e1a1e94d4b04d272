//! Saarthi error type.

use thiserror::Error;

/// All errors the Saarthi crates can produce.
#[derive(Error, Debug)]
pub enum SaarthiError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The verse corpus cannot satisfy the matcher's non-empty-result
    /// contract (empty corpus, unreadable corpus file, bad schema).
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("API key missing for provider: {0}")]
    ApiKeyMissing(String),

    /// A guidance request is already in flight on this engine.
    #[error("A guidance request is already in flight")]
    Busy,

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SaarthiError>;
