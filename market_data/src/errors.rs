use thiserror::Error;

use crate::io::sink::SinkError;
use crate::models::period::PeriodError;
use crate::providers::errors::ProviderError;

/// The unified error type for the `market_data` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from a data provider (e.g., API error, no data).
    #[error("provider error")]
    Provider(#[from] ProviderError),

    /// An error originating from a data sink (e.g., file I/O, CSV encoding).
    #[error("sink error")]
    Sink(#[from] SinkError),

    /// An invalid period token in a request.
    #[error("invalid period")]
    Period(#[from] PeriodError),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}
