//! Vendor-agnostic retrieval of historical stock market data.
//!
//! The crate is organized around three seams:
//!
//! - [`models`]: canonical [`Bar`](models::bar::Bar)/[`BarSeries`](models::bar_series::BarSeries)
//!   records plus the request vocabulary ([`Period`](models::period::Period),
//!   [`BarsRequestParams`](models::request_params::BarsRequestParams)).
//! - [`providers`]: the [`DataProvider`](providers::DataProvider) trait and the
//!   Yahoo chart REST implementation, with explicit retry and rate-limit policy.
//! - [`io`]: the [`DataSink`](io::sink::DataSink) trait and the CSV sink used
//!   for exports and the on-disk cache.

pub mod errors;
pub mod io;
pub mod models;
pub mod providers;
