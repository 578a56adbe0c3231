use serde::{Deserialize, Serialize};

use crate::{models::period::Period, providers::yahoo_chart::YahooBarsParams};

/// Universal parameters for requesting daily bar data from any market data provider.
///
/// This struct is designed to be vendor-agnostic and is the standard input
/// for all [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// List of symbols to request (e.g., `["AAPL"]`, `["AAPL", "MSFT"]`).
    ///
    /// Symbols are free text; validity is determined by the provider's own
    /// failure response (an unknown ticker surfaces as a no-data condition).
    pub symbols: Vec<String>,

    /// The historical range to fetch, as a [`Period`] token.
    ///
    /// Providers translate the token into their own range vocabulary and
    /// return daily bars covering it.
    pub period: Period,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl BarsRequestParams {
    /// Request for a single symbol with no provider-specific options.
    #[must_use]
    pub fn single(symbol: impl Into<String>, period: Period) -> Self {
        Self {
            symbols: vec![symbol.into()],
            period,
            provider_specific: ProviderParams::None,
        }
    }
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Yahoo(YahooBarsParams),
}
