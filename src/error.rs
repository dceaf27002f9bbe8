//! Error types for the crypto market board

use thiserror::Error;

/// Errors that can occur when fetching the market listing from a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body could not be parsed into quotes
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider answered with a non-success status
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,
}

impl ProviderError {
    /// Returns true for failures that happened before a response body was read
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ProviderError::NetworkError(_)
                | ProviderError::RateLimitExceeded
                | ProviderError::ApiError(_)
                | ProviderError::Timeout
        )
    }
}

/// Errors raised by the market board view-model
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The identifier is not part of the current batch
    #[error("Asset {id} is not in the current batch")]
    UnknownAsset { id: String },

    /// The requested position is outside the rotator's entries
    #[error("Index {index} is out of range for {len} entries")]
    OutOfRange { index: usize, len: usize },
}

impl BoardError {
    /// Creates an UnknownAsset error
    pub fn unknown_asset(id: &str) -> Self {
        Self::UnknownAsset { id: id.to_string() }
    }
}
