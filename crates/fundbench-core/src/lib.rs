//! # Fundbench Core
//!
//! Compares a mutual fund's NAV history against a market index over a date
//! range and produces a chart-ready payload.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | MFAPI (fund NAV) and Yahoo chart (index close) adapters |
//! | [`comparison`] | Request validation and the concurrent fetch-then-align service |
//! | [`data_source`] | Fetcher traits and [`FetchError`] |
//! | [`domain`] | [`TimeSeries`], [`DateRange`], identifiers, and the static [`Catalog`] |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`performance`] | Join, rebase, bounds, and rounding |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   ┌──────────────────┐
//! │  MfapiAdapter    │   │  YahooAdapter    │
//! │ (FundSeries…)    │   │ (IndexSeries…)   │
//! └────────┬─────────┘   └────────┬─────────┘
//!          │   tokio::join!       │
//!          └──────────┬───────────┘
//!                     ▼
//!          ┌──────────────────────┐
//!          │ PerformanceAligner   │
//!          └──────────┬───────────┘
//!                     ▼
//!             ComparisonPayload
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fundbench_core::{PerformanceAligner, TimeSeries};
//! use time::macros::date;
//!
//! let fund = TimeSeries::from_points([
//!     (date!(2024 - 01 - 01), 10.0),
//!     (date!(2024 - 01 - 02), 10.5),
//! ])?;
//! let index = TimeSeries::from_points([
//!     (date!(2024 - 01 - 01), 1000.0),
//!     (date!(2024 - 01 - 02), 1010.0),
//! ])?;
//!
//! let payload = PerformanceAligner::new("My Fund", "Nifty 50")
//!     .align(Some(&fund), Some(&index))
//!     .expect("shared dates");
//! assert_eq!(payload.fund_performance, vec![100.0, 105.0]);
//! # Ok::<(), fundbench_core::ValidationError>(())
//! ```

pub mod adapters;
pub mod comparison;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod performance;

pub use adapters::{MfapiAdapter, YahooAdapter};

pub use comparison::{CompareError, ComparisonRequest, ComparisonService};

pub use data_source::{
    FetchError, FetchErrorKind, FundSeriesSource, IndexSeriesSource, ProviderId,
};

pub use domain::{
    format_iso_date, parse_iso_date, Catalog, DateRange, FundEntry, IndexEntry, SchemeCode,
    Symbol, TimeSeries,
};

pub use error::ValidationError;

pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use performance::{
    round_2dp, AlignedFrame, AlignedRow, ComparisonPayload, Normalized, PerformanceAligner,
    RangeBounds,
};
