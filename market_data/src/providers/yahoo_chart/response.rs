//! Wire models for the chart and quoteSummary endpoints.
//!
//! Yahoo wraps most numbers as `{"raw": ..., "fmt": ...}` objects and omits
//! whole modules for tickers it cannot describe, so nearly everything here
//! is optional.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// Parallel OHLCV arrays; entries are null on halted or partial days.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct QuoteSummaryEnvelope {
    pub result: Option<Vec<QuoteSummaryResult>>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuoteSummaryResult {
    #[serde(rename = "assetProfile", default)]
    pub asset_profile: Option<AssetProfile>,
    #[serde(default)]
    pub price: Option<PriceBlock>,
    #[serde(rename = "summaryDetail", default)]
    pub summary_detail: Option<SummaryDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetProfile {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PriceBlock {
    #[serde(rename = "longName", default)]
    pub long_name: Option<String>,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(rename = "marketCap", default)]
    pub market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryDetail {
    #[serde(rename = "fiftyTwoWeekHigh", default)]
    pub fifty_two_week_high: Option<RawValue>,
    #[serde(rename = "fiftyTwoWeekLow", default)]
    pub fifty_two_week_low: Option<RawValue>,
    #[serde(default)]
    pub beta: Option<RawValue>,
}

/// Yahoo's `{"raw": n, "fmt": "n"}` number wrapper; `raw` alone matters.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct RawValue {
    #[serde(default)]
    pub raw: Option<f64>,
}

impl RawValue {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        self.raw
    }
}
