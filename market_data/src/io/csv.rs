//! CSV persistence for bar series.
//!
//! The export format is the user-facing artifact: one file per series with
//! the header `date,open,high,low,close,volume`, rows in series order, dates
//! as `%Y-%m-%d`. Reading a written file reproduces the series bar-for-bar,
//! which is also what the on-disk cache relies on.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::io::sink::{ConversionSnafu, DataSink, IoSnafu, SinkError};
use crate::models::{bar::Bar, bar_series::BarSeries, period::Period};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One CSV row; field order fixes the column order.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecord {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

/// File name for an exported series, e.g. `AAPL_1y_data.csv`.
#[must_use]
pub fn export_file_name(symbol: &str, period: Period) -> String {
    format!("{symbol}_{period}_data.csv")
}

/// Creates `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), SinkError> {
    fs::create_dir_all(dir).context(IoSnafu)
}

/// Writes one series to `path`, creating or truncating the file.
pub fn write_bar_series(path: &Path, series: &BarSeries) -> Result<(), SinkError> {
    let file = File::create(path).context(IoSnafu)?;
    let mut writer = csv::Writer::from_writer(file);

    // Write the header up front so an empty series still produces a valid file.
    writer
        .write_record(["date", "open", "high", "low", "close", "volume"])
        .map_err(|err| {
            ConversionSnafu {
                message: err.to_string(),
            }
            .build()
        })?;

    for bar in &series.bars {
        let record = CsvRecord {
            date: bar.timestamp.format(DATE_FORMAT).to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        };
        writer.serialize(record).map_err(|err| {
            ConversionSnafu {
                message: err.to_string(),
            }
            .build()
        })?;
    }

    writer.flush().context(IoSnafu)?;
    Ok(())
}

/// Reads a series previously written by [`write_bar_series`].
///
/// The symbol and period are not stored in the file, so the caller supplies
/// them (they are encoded in the file name by convention).
pub fn read_bar_series(path: &Path, symbol: &str, period: Period) -> Result<BarSeries, SinkError> {
    let file = File::open(path).context(IoSnafu)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut bars = Vec::new();
    for row in reader.deserialize() {
        let record: CsvRecord = row.map_err(|err| {
            ConversionSnafu {
                message: err.to_string(),
            }
            .build()
        })?;

        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).map_err(|err| {
            ConversionSnafu {
                message: format!("bad date `{}`: {err}", record.date),
            }
            .build()
        })?;

        bars.push(Bar {
            timestamp: date.and_time(NaiveTime::MIN).and_utc(),
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            volume: record.volume,
        });
    }

    Ok(BarSeries {
        symbol: symbol.to_string(),
        period,
        bars,
    })
}

/// Sink that writes each series to its own CSV file under a directory.
pub struct CsvSink {
    dir: PathBuf,
}

impl CsvSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DataSink for CsvSink {
    type Output = Vec<PathBuf>;

    async fn write(&self, data: &[BarSeries]) -> Result<Self::Output, SinkError> {
        ensure_dir(&self.dir)?;

        let mut paths = Vec::with_capacity(data.len());
        for series in data {
            let path = self.dir.join(export_file_name(&series.symbol, series.period));
            write_bar_series(&path, series)?;
            paths.push(path);
        }
        Ok(paths)
    }
}
