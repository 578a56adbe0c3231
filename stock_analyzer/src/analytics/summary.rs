//! Period-wide return statistics.

use crate::analytics::TRADING_DAYS_PER_YEAR;
use crate::analytics::derived::sample_std;

/// Summary statistics over the defined daily returns of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSummary {
    /// Arithmetic mean of the daily returns.
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two returns.
    pub std_dev: Option<f64>,
    /// Worst single-day return.
    pub min: f64,
    /// Best single-day return.
    pub max: f64,
    /// Approximate annualized Sharpe ratio: `(mean / std) * sqrt(252)`.
    ///
    /// `None` when the standard deviation is zero or undefined; identical
    /// daily returns are a degenerate input, not a fault.
    pub sharpe: Option<f64>,
}

impl ReturnSummary {
    /// Builds the summary from an aligned daily-return column.
    ///
    /// Returns `None` when no daily return is defined (series shorter than
    /// two bars), so callers can omit the statistics block entirely.
    #[must_use]
    pub fn from_daily_returns(daily: &[Option<f64>]) -> Option<Self> {
        let returns: Vec<f64> = daily.iter().copied().flatten().collect();
        if returns.is_empty() {
            return None;
        }

        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let std_dev = sample_std(&returns);
        let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
        let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let sharpe = std_dev
            .filter(|std| *std > 0.0)
            .map(|std| mean / std * TRADING_DAYS_PER_YEAR.sqrt());

        Some(Self {
            mean,
            std_dev,
            min,
            max,
            sharpe,
        })
    }
}
