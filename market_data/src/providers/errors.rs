use thiserror::Error;

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API returned a specific error message.
    #[error("API error: {0}")]
    Api(String),

    /// The provider knows nothing about the symbol, or the requested range
    /// holds no data. Callers surface this as a notice, not a fault.
    #[error("no data returned for symbol {symbol}")]
    NoData { symbol: String },

    /// The request parameters were invalid for this specific provider.
    #[error("invalid parameters for provider: {0}")]
    Validation(String),

    /// An internal error occurred while processing data within the provider.
    #[error("internal provider error: {0}")]
    Internal(String),
}
