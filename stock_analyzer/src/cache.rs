//! On-disk cache of fetched bar series.
//!
//! The policy is deliberately explicit: entries live as CSV files under a
//! configured directory, keyed by symbol and period, and expire by file
//! modification time. Anything stale or unreadable is a miss that falls
//! through to a fresh fetch.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use market_data::io::csv::{ensure_dir, read_bar_series, write_bar_series};
use market_data::io::sink::SinkError;
use market_data::models::{bar_series::BarSeries, period::Period};

use crate::config::CacheConfig;

pub struct SeriesCache {
    dir: PathBuf,
    ttl: Duration,
}

impl SeriesCache {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Builds a cache from config; `None` when caching is disabled.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Option<Self> {
        config
            .enabled
            .then(|| Self::new(config.dir.clone(), Duration::from_secs(config.ttl_secs)))
    }

    fn entry_path(&self, symbol: &str, period: Period) -> PathBuf {
        self.dir.join(format!("{symbol}_{period}.csv"))
    }

    /// Returns the cached series if a fresh entry exists.
    #[must_use]
    pub fn load(&self, symbol: &str, period: Period) -> Option<BarSeries> {
        let path = self.entry_path(symbol, period);
        let age = fs::metadata(&path).ok()?.modified().ok()?.elapsed().ok()?;

        if age > self.ttl {
            tracing::debug!(%symbol, %period, ?age, "cache entry is stale");
            return None;
        }

        match read_bar_series(&path, symbol, period) {
            Ok(series) => Some(series),
            Err(err) => {
                tracing::debug!(%symbol, %period, error = %err, "unreadable cache entry");
                None
            }
        }
    }

    /// Writes or replaces the entry for `series`.
    pub fn store(&self, series: &BarSeries) -> Result<(), SinkError> {
        ensure_dir(&self.dir)?;
        write_bar_series(&self.entry_path(&series.symbol, series.period), series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use market_data::models::bar::Bar;

    fn sample_series() -> BarSeries {
        BarSeries {
            symbol: "AAPL".to_string(),
            period: Period::OneMonth,
            bars: vec![Bar {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                    .unwrap()
                    .and_time(NaiveTime::MIN)
                    .and_utc(),
                open: 186.1,
                high: 186.9,
                low: 183.4,
                close: 185.6,
                volume: 82_488_700,
            }],
        }
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::new(dir.path(), Duration::from_secs(600));
        let series = sample_series();

        cache.store(&series).unwrap();
        assert_eq!(cache.load("AAPL", Period::OneMonth), Some(series));
    }

    #[test]
    fn missing_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::new(dir.path(), Duration::from_secs(600));
        assert!(cache.load("MSFT", Period::OneYear).is_none());
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::new(dir.path(), Duration::ZERO);

        cache.store(&sample_series()).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.load("AAPL", Period::OneMonth).is_none());
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::new(dir.path(), Duration::from_secs(600));

        fs::write(dir.path().join("AAPL_1mo.csv"), "not,a,bar,series\n1,2,3,4\n").unwrap();
        assert!(cache.load("AAPL", Period::OneMonth).is_none());
    }

    #[test]
    fn disabled_config_builds_no_cache() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        assert!(SeriesCache::from_config(&config).is_none());
    }

    #[test]
    fn entries_are_keyed_by_symbol_and_period() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SeriesCache::new(dir.path(), Duration::from_secs(600));

        cache.store(&sample_series()).unwrap();
        assert!(cache.load("AAPL", Period::OneYear).is_none());
    }
}
