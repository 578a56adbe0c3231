//! Static descriptive record for a listed company.

use serde::{Deserialize, Serialize};

/// Descriptive company fields, fetched once per ticker.
///
/// The record has a lifecycle independent from any bar series, and every
/// field except the symbol may be absent for unlisted or delisted tickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// The ticker symbol this record describes.
    pub symbol: String,
    /// Full company name.
    pub name: Option<String>,
    /// GICS-style sector (e.g., "Technology").
    pub sector: Option<String>,
    /// Industry within the sector.
    pub industry: Option<String>,
    /// Country of incorporation.
    pub country: Option<String>,
    /// Market capitalization in the listing currency.
    pub market_cap: Option<f64>,
    /// Highest trade price over the trailing 52 weeks.
    pub fifty_two_week_high: Option<f64>,
    /// Lowest trade price over the trailing 52 weeks.
    pub fifty_two_week_low: Option<f64>,
    /// Beta relative to the benchmark index.
    pub beta: Option<f64>,
}
