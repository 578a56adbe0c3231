//! A collection of daily bars for a specific symbol over a requested period.

use crate::models::{bar::Bar, period::Period};

/// Represents a complete set of daily bars for a single symbol.
///
/// This struct groups a vector of [`Bar`]s with their corresponding symbol
/// and [`Period`], making the data set self-describing. A series is
/// immutable once fetched; bars are ordered ascending by date.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL").
    pub symbol: String,
    /// The requested historical range the bars cover.
    pub period: Period,
    /// The collection of OHLCV bars, ascending by date.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Number of bars in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in series order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
