use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveTime, TimeZone, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use indexmap::IndexMap;
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::models::{
    bar::Bar, bar_series::BarSeries, company::CompanyInfo, period::Period,
    request_params::{BarsRequestParams, ProviderParams},
};
use crate::providers::{
    DataProvider,
    errors::ProviderError,
    retry::{self, RetryPolicy},
    yahoo_chart::{
        params::YahooBarsParams,
        response::{ApiError, ChartResponse, QuoteSummaryResponse},
    },
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const QUOTE_SUMMARY_MODULES: &str = "assetProfile,price,summaryDetail";

/// Connection and policy settings for [`YahooChartProvider`].
#[derive(Clone, Debug)]
pub struct YahooChartSettings {
    /// Endpoint root, overridable for tests or a caching proxy.
    pub base_url: String,
    /// User agent sent with every request; the API rejects bare clients.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Request budget per minute, enforced locally before each call.
    pub requests_per_minute: u32,
    /// Backoff policy for transient failures.
    pub retry: RetryPolicy,
}

impl Default for YahooChartSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            timeout: Duration::from_secs(30),
            requests_per_minute: 60,
            retry: RetryPolicy::default(),
        }
    }
}

/// [`DataProvider`] backed by the public Yahoo chart endpoints.
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    /// Creates a provider from the given settings.
    pub fn new(settings: YahooChartSettings) -> Result<Self, ProviderError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&settings.user_agent).map_err(|_| {
                ProviderError::Validation(format!(
                    "user agent is not a valid header value: {}",
                    settings.user_agent
                ))
            })?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        let per_minute =
            NonZeroU32::new(settings.requests_per_minute).unwrap_or(nonzero!(60u32));

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            retry: settings.retry,
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
        })
    }

    /// Issues one rate-limited GET with retry on transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let mut attempt = 0u32;
        loop {
            self.limiter.until_ready().await;

            match self.client.get(url).query(query).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.json::<T>().await?);
                    }

                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unknown API error".to_string());
                    if retry::is_retryable_status(status) && attempt < self.retry.max_retries {
                        tracing::debug!(%status, attempt, "retrying request after backoff");
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ProviderError::Api(format!("{status}: {body}")));
                }
                Err(err) => {
                    if retry::is_retryable_transport(&err) && attempt < self.retry.max_retries {
                        tracing::debug!(error = %err, attempt, "retrying request after backoff");
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ProviderError::Request(err));
                }
            }
        }
    }
}

#[async_trait]
impl DataProvider for YahooChartProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        if params.symbols.is_empty() {
            return Err(ProviderError::Validation(
                "at least one symbol is required".to_string(),
            ));
        }

        let yahoo = match &params.provider_specific {
            ProviderParams::Yahoo(p) => p.clone(),
            ProviderParams::None => YahooBarsParams::default(),
        };

        let mut all_series: IndexMap<String, BarSeries> = IndexMap::new();
        for symbol in &params.symbols {
            let symbol = symbol.trim().to_uppercase();
            let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
            let query = chart_query(params.period, &yahoo);

            tracing::debug!(%symbol, period = %params.period, "fetching daily bars");
            let response: ChartResponse = self.get_json(&url, &query).await?;
            let series = series_from_chart(&symbol, params.period, response)?;
            all_series.insert(symbol, series);
        }

        Ok(all_series.into_values().collect())
    }

    async fn fetch_company_info(&self, symbol: &str) -> Result<CompanyInfo, ProviderError> {
        let symbol = symbol.trim().to_uppercase();
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);
        let query = [("modules", QUOTE_SUMMARY_MODULES.to_string())];

        tracing::debug!(%symbol, "fetching company record");
        let response: QuoteSummaryResponse = self.get_json(&url, &query).await?;
        company_from_summary(&symbol, response)
    }
}

fn chart_query(period: Period, yahoo: &YahooBarsParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("range", period.as_str().to_string()),
        ("interval", yahoo.interval.unwrap_or_default().as_str().to_string()),
    ];
    if let Some(prepost) = yahoo.include_prepost {
        query.push(("includePrePost", prepost.to_string()));
    }
    if let Some(events) = &yahoo.events {
        query.push(("events", events.clone()));
    }
    query
}

/// An API error body either means "unknown ticker" or a genuine fault.
fn classify_api_error(symbol: &str, err: ApiError) -> ProviderError {
    let code = err.code.to_lowercase();
    if code.contains("not found") {
        ProviderError::NoData {
            symbol: symbol.to_string(),
        }
    } else {
        ProviderError::Api(format!("{}: {}", err.code, err.description))
    }
}

/// Converts one chart response into the canonical series.
///
/// Rows with any null OHLCV component (halted days) are skipped; the rest
/// are normalized to midnight UTC of the trading date, sorted, and
/// de-duplicated so the series invariants hold regardless of vendor quirks.
fn series_from_chart(
    symbol: &str,
    period: Period,
    response: ChartResponse,
) -> Result<BarSeries, ProviderError> {
    if let Some(err) = response.chart.error {
        return Err(classify_api_error(symbol, err));
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.swap_remove(0))
            }
        })
        .ok_or_else(|| ProviderError::NoData {
            symbol: symbol.to_string(),
        })?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let row = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = row else {
            continue;
        };

        let moment = Utc.timestamp_opt(*ts, 0).single().ok_or_else(|| {
            ProviderError::Internal(format!("timestamp {ts} out of range"))
        })?;
        let trading_date = moment.date_naive().and_time(NaiveTime::MIN).and_utc();

        bars.push(Bar {
            timestamp: trading_date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars.sort_by_key(|bar| bar.timestamp);
    bars.dedup_by_key(|bar| bar.timestamp);

    Ok(BarSeries {
        symbol: symbol.to_string(),
        period,
        bars,
    })
}

/// Converts one quoteSummary response into [`CompanyInfo`].
///
/// Missing modules or fields leave the record partially filled; only an
/// explicit API error aborts.
fn company_from_summary(
    symbol: &str,
    response: QuoteSummaryResponse,
) -> Result<CompanyInfo, ProviderError> {
    if let Some(err) = response.quote_summary.error {
        return Err(classify_api_error(symbol, err));
    }

    let result = response
        .quote_summary
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.swap_remove(0))
            }
        })
        .unwrap_or_default();

    let mut info = CompanyInfo {
        symbol: symbol.to_string(),
        ..CompanyInfo::default()
    };

    if let Some(profile) = result.asset_profile {
        info.sector = profile.sector;
        info.industry = profile.industry;
        info.country = profile.country;
    }
    if let Some(price) = result.price {
        info.name = price.long_name.or(price.short_name);
        info.market_cap = price.market_cap.and_then(|v| v.value());
    }
    if let Some(detail) = result.summary_detail {
        info.fifty_two_week_high = detail.fifty_two_week_high.and_then(|v| v.value());
        info.fifty_two_week_low = detail.fifty_two_week_low.and_then(|v| v.value());
        info.beta = detail.beta.and_then(|v| v.value());
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_fixture(json: &str) -> ChartResponse {
        serde_json::from_str(json).expect("fixture must parse")
    }

    const TWO_DAY_CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "currency": "USD"},
                "timestamp": [1704205800, 1704292200],
                "indicators": {
                    "quote": [{
                        "open":   [186.1, 184.2],
                        "high":   [186.9, 185.9],
                        "low":    [183.4, 183.9],
                        "close":  [185.6, 184.3],
                        "volume": [82488700, 58414500]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn maps_chart_rows_to_bars() {
        let series =
            series_from_chart("AAPL", Period::OneMonth, chart_fixture(TWO_DAY_CHART)).unwrap();

        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.period, Period::OneMonth);
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars[0].close, 185.6);
        assert_eq!(series.bars[1].volume, 58414500);
        assert!(series.bars[0].timestamp < series.bars[1].timestamp);
    }

    #[test]
    fn bars_are_normalized_to_midnight_utc() {
        let series =
            series_from_chart("AAPL", Period::OneMonth, chart_fixture(TWO_DAY_CHART)).unwrap();
        for bar in &series.bars {
            assert_eq!(bar.timestamp.time(), NaiveTime::MIN);
        }
    }

    #[test]
    fn null_rows_are_skipped() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": {
                        "quote": [{
                            "open":   [186.1, null, 184.0],
                            "high":   [186.9, 185.9, 184.8],
                            "low":    [183.4, 183.9, 183.0],
                            "close":  [185.6, 184.3, 184.5],
                            "volume": [82488700, 58414500, null]
                        }]
                    }
                }],
                "error": null
            }
        }"#;

        let series = series_from_chart("AAPL", Period::OneMonth, chart_fixture(json)).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.bars[0].close, 185.6);
    }

    #[test]
    fn unknown_ticker_is_no_data() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;

        let err = series_from_chart("ZZZZ", Period::OneYear, chart_fixture(json)).unwrap_err();
        assert!(matches!(err, ProviderError::NoData { symbol } if symbol == "ZZZZ"));
    }

    #[test]
    fn other_api_errors_are_preserved() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Bad Request", "description": "Invalid interval"}
            }
        }"#;

        let err = series_from_chart("AAPL", Period::OneYear, chart_fixture(json)).unwrap_err();
        assert!(matches!(err, ProviderError::Api(message) if message.contains("Invalid interval")));
    }

    #[test]
    fn valid_ticker_with_no_rows_yields_an_empty_series() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [],
                    "indicators": {"quote": [{}]}
                }],
                "error": null
            }
        }"#;

        let series = series_from_chart("AAPL", Period::OneMonth, chart_fixture(json)).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn company_record_fills_only_what_the_vendor_sent() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "assetProfile": {"sector": "Technology", "industry": "Consumer Electronics", "country": "United States"},
                    "price": {"longName": "Apple Inc.", "marketCap": {"raw": 2.95e12, "fmt": "2.95T"}},
                    "summaryDetail": {
                        "fiftyTwoWeekHigh": {"raw": 199.62},
                        "fiftyTwoWeekLow": {"raw": 164.08},
                        "beta": {"raw": 1.29}
                    }
                }],
                "error": null
            }
        }"#;

        let response: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let info = company_from_summary("AAPL", response).unwrap();

        assert_eq!(info.symbol, "AAPL");
        assert_eq!(info.name.as_deref(), Some("Apple Inc."));
        assert_eq!(info.sector.as_deref(), Some("Technology"));
        assert_eq!(info.market_cap, Some(2.95e12));
        assert_eq!(info.beta, Some(1.29));
    }

    #[test]
    fn sparse_company_record_is_not_an_error() {
        let json = r#"{
            "quoteSummary": {
                "result": [{"price": {"shortName": "Some ETF"}}],
                "error": null
            }
        }"#;

        let response: QuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let info = company_from_summary("SPY", response).unwrap();

        assert_eq!(info.name.as_deref(), Some("Some ETF"));
        assert!(info.sector.is_none());
        assert!(info.market_cap.is_none());
    }

    #[test]
    fn chart_query_includes_range_and_interval() {
        let query = chart_query(Period::SixMonths, &YahooBarsParams::default());
        assert!(query.contains(&("range", "6mo".to_string())));
        assert!(query.contains(&("interval", "1d".to_string())));
    }
}
