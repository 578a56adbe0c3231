//! Descriptive stock analysis over daily bar data.
//!
//! The crate turns a fetched [`BarSeries`](market_data::models::bar_series::BarSeries)
//! into derived per-bar columns (moving averages, returns, rolling
//! volatility), summary statistics, chart-ready inputs, and a text metrics
//! panel. One [`AnalysisRequest`](pipeline::AnalysisRequest) drives one
//! fetch → compute → render cycle; nothing persists across cycles except
//! the optional on-disk series cache.

pub mod analytics;
pub mod cache;
pub mod cli;
pub mod config;
pub mod overlays;
pub mod pipeline;
pub mod report;
