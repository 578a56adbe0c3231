//! Chart-ready inputs assembled from a series and its derived columns.
//!
//! Renderers get plain data: candle bars come straight from the series, and
//! everything here is a label plus aligned points. A derived column
//! contributes only its defined values; a moving average whose window
//! exceeds the available history produces no overlay at all. Zero-filling
//! the undefined prefix would corrupt the chart's price scale.

use chrono::{DateTime, Utc};
use market_data::models::bar_series::BarSeries;

use crate::analytics::DerivedSeries;
use crate::pipeline::DisplayOptions;

/// A labeled line aligned with the candle chart's time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub label: String,
    pub points: Vec<(DateTime<Utc>, f64)>,
}

/// Everything a renderer needs beyond the raw candles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartInputs {
    /// Moving-average lines, one per enabled window with any defined value.
    pub overlays: Vec<Overlay>,
    /// Volume columns, when enabled.
    pub volume: Option<Vec<(DateTime<Utc>, u64)>>,
    /// Cumulative-return line, when returns analysis is enabled.
    pub cumulative_return: Option<Vec<(DateTime<Utc>, f64)>>,
    /// Annualized rolling-volatility line, when returns analysis is enabled.
    pub rolling_volatility: Option<Vec<(DateTime<Utc>, f64)>>,
    /// Defined daily returns for the distribution histogram, when enabled.
    pub daily_return_sample: Option<Vec<f64>>,
}

/// Builds one overlay from a derived column, omitting undefined entries.
fn overlay(
    label: &str,
    dates: &[DateTime<Utc>],
    column: &[Option<f64>],
) -> Option<Overlay> {
    let points: Vec<(DateTime<Utc>, f64)> = dates
        .iter()
        .zip(column)
        .filter_map(|(date, value)| value.map(|v| (*date, v)))
        .collect();

    if points.is_empty() {
        None
    } else {
        Some(Overlay {
            label: label.to_string(),
            points,
        })
    }
}

/// Assembles chart inputs for one analysis cycle.
#[must_use]
pub fn assemble(
    series: &BarSeries,
    derived: &DerivedSeries,
    options: &DisplayOptions,
) -> ChartInputs {
    let dates: Vec<DateTime<Utc>> = series.bars.iter().map(|bar| bar.timestamp).collect();

    let mut overlays = Vec::new();
    let windows = [
        (options.ma_20, "20-day MA", &derived.ma_20),
        (options.ma_50, "50-day MA", &derived.ma_50),
        (options.ma_200, "200-day MA", &derived.ma_200),
    ];
    for (enabled, label, column) in windows {
        if enabled {
            overlays.extend(overlay(label, &dates, column));
        }
    }

    let volume = options.volume.then(|| {
        series
            .bars
            .iter()
            .map(|bar| (bar.timestamp, bar.volume))
            .collect()
    });

    let cumulative_return = options
        .returns
        .then(|| overlay("Cumulative Return", &dates, &derived.cumulative_return))
        .flatten()
        .map(|o| o.points);

    let rolling_volatility = options
        .returns
        .then(|| overlay("20-day Volatility", &dates, &derived.rolling_volatility_20))
        .flatten()
        .map(|o| o.points);

    let daily_return_sample = options
        .returns
        .then(|| derived.daily_return.iter().copied().flatten().collect());

    ChartInputs {
        overlays,
        volume,
        cumulative_return,
        rolling_volatility,
        daily_return_sample,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use market_data::models::{bar::Bar, period::Period};

    fn series_from_closes(closes: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: (start + chrono::Days::new(i as u64))
                    .and_time(NaiveTime::MIN)
                    .and_utc(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 500,
            })
            .collect();
        BarSeries {
            symbol: "TEST".to_string(),
            period: Period::OneYear,
            bars,
        }
    }

    fn thirty_bar_inputs(options: &DisplayOptions) -> ChartInputs {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let series = series_from_closes(&closes);
        let derived = DerivedSeries::compute(&series);
        assemble(&series, &derived, options)
    }

    #[test]
    fn short_history_omits_the_long_windows() {
        let inputs = thirty_bar_inputs(&DisplayOptions::default());

        // 30 bars: the 20-day line exists, the 50- and 200-day lines do not.
        let labels: Vec<&str> = inputs.overlays.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["20-day MA"]);
    }

    #[test]
    fn overlay_points_skip_the_undefined_prefix() {
        let inputs = thirty_bar_inputs(&DisplayOptions::default());

        let ma20 = &inputs.overlays[0];
        // Defined from index 19 onward: 11 points, none of them zero-filled.
        assert_eq!(ma20.points.len(), 11);
        assert!(ma20.points.iter().all(|(_, v)| *v > 0.0));
    }

    #[test]
    fn disabled_toggles_drop_their_inputs() {
        let options = DisplayOptions {
            ma_20: false,
            ma_50: false,
            ma_200: false,
            volume: false,
            returns: false,
        };
        let inputs = thirty_bar_inputs(&options);

        assert!(inputs.overlays.is_empty());
        assert!(inputs.volume.is_none());
        assert!(inputs.cumulative_return.is_none());
        assert!(inputs.rolling_volatility.is_none());
        assert!(inputs.daily_return_sample.is_none());
    }

    #[test]
    fn histogram_sample_holds_only_defined_returns() {
        let inputs = thirty_bar_inputs(&DisplayOptions::default());
        // 30 bars produce 29 defined daily returns.
        assert_eq!(inputs.daily_return_sample.as_ref().unwrap().len(), 29);
    }

    #[test]
    fn empty_series_produces_empty_inputs() {
        let series = series_from_closes(&[]);
        let derived = DerivedSeries::compute(&series);
        let inputs = assemble(&series, &derived, &DisplayOptions::default());

        assert!(inputs.overlays.is_empty());
        assert_eq!(inputs.volume.as_deref(), Some(&[][..]));
        assert!(inputs.cumulative_return.is_none());
    }
}
