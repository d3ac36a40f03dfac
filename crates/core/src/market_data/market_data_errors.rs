use thiserror::Error;

/// Errors raised while fetching or parsing market data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested scheme or symbol is unknown to the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider could not be reached or answered with an error status.
    #[error("Provider error: {provider} - {message}")]
    ProviderError { provider: String, message: String },

    /// The provider answered with a payload we could not understand.
    #[error("Failed to parse provider response: {0}")]
    ParseError(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
}
