//! Upstream data adapters.
//!
//! | Adapter | Upstream | Contract |
//! |---------|----------|----------|
//! | [`MfapiAdapter`] | api.mfapi.in | [`FundSeriesSource`](crate::FundSeriesSource) |
//! | [`YahooAdapter`] | Yahoo Finance chart API | [`IndexSeriesSource`](crate::IndexSeriesSource) |

mod mfapi;
mod yahoo;

pub use mfapi::MfapiAdapter;
pub use yahoo::YahooAdapter;
