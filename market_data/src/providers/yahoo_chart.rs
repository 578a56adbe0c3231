//! Yahoo chart API provider.
//!
//! Daily bars come from the `v8/finance/chart` endpoint, company records
//! from `v10/finance/quoteSummary`. Both are unauthenticated; the only
//! courtesy the API expects is a browser-like user agent.

pub mod params;
pub mod provider;
pub mod response;

pub use params::{Interval, YahooBarsParams};
pub use provider::{YahooChartProvider, YahooChartSettings};
