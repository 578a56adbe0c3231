//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, which serves as a unified
//! interface for fetching daily bar data and company records from any market
//! data vendor.
//!
//! Each concrete provider implementation (such as the Yahoo chart API) should
//! implement [`DataProvider`] to handle vendor-specific wire formats and
//! error classification.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataProvider`) for runtime selection of providers.

pub mod errors;
pub mod retry;
pub mod yahoo_chart;

use async_trait::async_trait;

use crate::models::{
    bar_series::BarSeries, company::CompanyInfo, request_params::BarsRequestParams,
};
use crate::providers::errors::ProviderError;

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetches daily bars for every requested symbol, in request order.
    ///
    /// A valid ticker with no bars in the range yields an empty series;
    /// an unknown ticker surfaces as [`ProviderError::NoData`].
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError>;

    /// Fetches the descriptive company record for one symbol.
    ///
    /// Fields the vendor does not supply are left absent.
    async fn fetch_company_info(&self, symbol: &str) -> Result<CompanyInfo, ProviderError>;
}
