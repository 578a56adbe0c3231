//! Canonical in-memory representation of one trading day (OHLCV).
//!
//! This struct is the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations, regardless of the vendor the bars came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single daily OHLCV bar.
///
/// Daily bars are normalized to midnight UTC of the trading date, so a
/// series carries one bar per calendar trading day with no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// The trading date for this bar (midnight UTC).
    pub timestamp: DateTime<Utc>,

    /// Opening price.
    pub open: f64,

    /// Highest price during the trading day.
    pub high: f64,

    /// Lowest price during the trading day.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Shares traded during the day.
    pub volume: u64,
}
