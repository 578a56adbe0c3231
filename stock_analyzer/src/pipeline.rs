//! The fetch → compute → render cycle.
//!
//! All user input for one cycle lives in an immutable [`AnalysisRequest`];
//! nothing is carried between cycles except the optional on-disk cache.

use std::path::{Path, PathBuf};

use thiserror::Error;

use market_data::io::csv::CsvSink;
use market_data::io::sink::{DataSink, SinkError};
use market_data::models::{
    bar_series::BarSeries, company::CompanyInfo, period::Period,
    request_params::BarsRequestParams,
};
use market_data::providers::{DataProvider, errors::ProviderError};

use crate::analytics::{DerivedSeries, ReturnSummary};
use crate::cache::SeriesCache;
use crate::overlays::{self, ChartInputs};
use crate::report;

/// Per-cycle display toggles, all enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub ma_20: bool,
    pub ma_50: bool,
    pub ma_200: bool,
    pub volume: bool,
    pub returns: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            ma_20: true,
            ma_50: true,
            ma_200: true,
            volume: true,
            returns: true,
        }
    }
}

/// Everything the user selected for one analysis cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Ticker symbol, case-insensitive; upper-cased before the fetch.
    pub symbol: String,
    /// Historical range to analyze.
    pub period: Period,
    /// Display toggles.
    pub options: DisplayOptions,
}

/// The computed results of one cycle.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// The rendered metrics panel.
    pub report: String,
    /// Inputs for any chart renderer.
    pub chart: ChartInputs,
    /// The fetched series the results were computed from.
    pub series: BarSeries,
    /// Per-bar derived columns.
    pub derived: DerivedSeries,
    /// Period-wide return statistics, absent for very short series.
    pub summary: Option<ReturnSummary>,
    /// Company record, absent when the vendor cannot describe the ticker.
    pub company: Option<CompanyInfo>,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The ticker is unknown or the range holds no bars. Surfaced to the
    /// user as a notice; no computation is attempted.
    #[error("no data available for ticker {symbol}")]
    NoData { symbol: String },

    /// A provider failure other than "no data".
    #[error("provider failure")]
    Provider(#[source] ProviderError),

    /// Writing the export artifact failed.
    #[error("export failure")]
    Sink(#[from] SinkError),
}

/// Fetches one series, consulting the cache first when one is configured.
async fn fetch_series(
    provider: &dyn DataProvider,
    cache: Option<&SeriesCache>,
    symbol: &str,
    period: Period,
) -> Result<BarSeries, AnalysisError> {
    if let Some(series) = cache.and_then(|c| c.load(symbol, period)) {
        tracing::info!(%symbol, %period, "serving bars from cache");
        return Ok(series);
    }

    let params = BarsRequestParams::single(symbol, period);
    let mut all = provider.fetch_bars(params).await.map_err(|err| match err {
        ProviderError::NoData { symbol } => AnalysisError::NoData { symbol },
        other => AnalysisError::Provider(other),
    })?;

    if all.is_empty() {
        return Err(AnalysisError::NoData {
            symbol: symbol.to_string(),
        });
    }
    let series = all.swap_remove(0);

    if let Some(cache) = cache {
        if let Err(err) = cache.store(&series) {
            tracing::warn!(%symbol, error = %err, "failed to cache fetched series");
        }
    }

    Ok(series)
}

/// Runs one full analysis cycle for `request`.
///
/// An empty series is reported as [`AnalysisError::NoData`] before any
/// computation; every other degenerate input (short history, constant
/// returns) flows through and renders with the affected values absent.
pub async fn run_analysis(
    provider: &dyn DataProvider,
    cache: Option<&SeriesCache>,
    request: &AnalysisRequest,
) -> Result<AnalysisOutcome, AnalysisError> {
    let symbol = request.symbol.trim().to_uppercase();

    let series = fetch_series(provider, cache, &symbol, request.period).await?;
    if series.is_empty() {
        return Err(AnalysisError::NoData { symbol });
    }

    let company = match provider.fetch_company_info(&symbol).await {
        Ok(info) => Some(info),
        Err(err) => {
            tracing::warn!(%symbol, error = %err, "company record unavailable");
            None
        }
    };

    let derived = DerivedSeries::compute(&series);
    let summary = ReturnSummary::from_daily_returns(&derived.daily_return);
    let chart = overlays::assemble(&series, &derived, &request.options);
    let report = report::render_report(
        &series,
        &derived,
        summary.as_ref(),
        company.as_ref(),
        &request.options,
    );

    Ok(AnalysisOutcome {
        report,
        chart,
        series,
        derived,
        summary,
        company,
    })
}

/// Fetches one series and writes it as the CSV export artifact.
///
/// Returns the path of the written file.
pub async fn run_export(
    provider: &dyn DataProvider,
    cache: Option<&SeriesCache>,
    symbol: &str,
    period: Period,
    out_dir: &Path,
) -> Result<PathBuf, AnalysisError> {
    let symbol = symbol.trim().to_uppercase();

    let series = fetch_series(provider, cache, &symbol, period).await?;
    if series.is_empty() {
        return Err(AnalysisError::NoData { symbol });
    }

    let sink = CsvSink::new(out_dir);
    let mut paths = sink.write(std::slice::from_ref(&series)).await?;
    paths.pop().ok_or(AnalysisError::NoData { symbol })
}
