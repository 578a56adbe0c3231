//! Per-bar derived columns.
//!
//! Every function is pure and aligns its output with the input by index:
//! `out[i]` is `None` until enough trailing history exists, and depends only
//! on values at indices `<= i`.

use market_data::models::bar_series::BarSeries;

use crate::analytics::{MA_LONG, MA_MID, MA_SHORT, TRADING_DAYS_PER_YEAR, VOLATILITY_WINDOW};

/// Trailing arithmetic mean of `values` over `window` entries.
///
/// Defined exactly for indices `i >= window - 1`; a window longer than the
/// input leaves the whole column undefined.
#[must_use]
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for i in (window - 1)..values.len() {
        let trailing = &values[i + 1 - window..=i];
        let sum: f64 = trailing.iter().sum();
        out[i] = Some(sum / window as f64);
    }
    out
}

/// Percent change of consecutive closes; undefined at index 0.
#[must_use]
pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    for i in 1..closes.len() {
        let prev = closes[i - 1];
        if prev != 0.0 {
            out[i] = Some(closes[i] / prev - 1.0);
        }
    }
    out
}

/// Running compounded return: `Π(1 + r) - 1` over the defined returns.
///
/// Undefined exactly where the daily return is undefined.
#[must_use]
pub fn cumulative_returns(daily: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = vec![None; daily.len()];
    let mut growth = 1.0;
    for (i, r) in daily.iter().enumerate() {
        if let Some(r) = r {
            growth *= 1.0 + r;
            out[i] = Some(growth - 1.0);
        }
    }
    out
}

/// Trailing sample standard deviation of daily returns, annualized by √252.
///
/// A window position counts only when every one of its `window` entries is
/// defined, so with daily bars the column first appears one bar after the
/// window is nominally full (the first bar contributes no return).
#[must_use]
pub fn rolling_volatility(daily: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; daily.len()];
    if window < 2 || daily.len() < window {
        return out;
    }

    for i in (window - 1)..daily.len() {
        let trailing = &daily[i + 1 - window..=i];
        let Some(values) = trailing.iter().copied().collect::<Option<Vec<f64>>>() else {
            continue;
        };
        out[i] = sample_std(&values).map(|std| std * TRADING_DAYS_PER_YEAR.sqrt());
    }
    out
}

/// Sample standard deviation (n-1 denominator); `None` for fewer than two values.
#[must_use]
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / (n - 1) as f64;
    Some(variance.sqrt())
}

/// All derived columns for one series, aligned by index with its bars.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    pub ma_20: Vec<Option<f64>>,
    pub ma_50: Vec<Option<f64>>,
    pub ma_200: Vec<Option<f64>>,
    pub daily_return: Vec<Option<f64>>,
    pub cumulative_return: Vec<Option<f64>>,
    pub rolling_volatility_20: Vec<Option<f64>>,
}

impl DerivedSeries {
    /// Computes every derived column for `series`.
    ///
    /// An empty series yields empty columns; nothing here can fail.
    #[must_use]
    pub fn compute(series: &BarSeries) -> Self {
        let closes = series.closes();
        let daily_return = daily_returns(&closes);

        Self {
            ma_20: moving_average(&closes, MA_SHORT),
            ma_50: moving_average(&closes, MA_MID),
            ma_200: moving_average(&closes, MA_LONG),
            cumulative_return: cumulative_returns(&daily_return),
            rolling_volatility_20: rolling_volatility(&daily_return, VOLATILITY_WINDOW),
            daily_return,
        }
    }

    /// Number of rows (equals the bar count of the source series).
    #[must_use]
    pub fn len(&self) -> usize {
        self.daily_return.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.daily_return.is_empty()
    }

    /// Most recent defined 20-day volatility, if any.
    #[must_use]
    pub fn latest_volatility(&self) -> Option<f64> {
        self.rolling_volatility_20.last().copied().flatten()
    }
}
