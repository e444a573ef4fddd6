//! # Domain Models
//!
//! Canonical domain types for fundbench comparisons.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TimeSeries`] | Date-keyed series of finite values |
//! | [`DateRange`] | Inclusive calendar date range |
//! | [`SchemeCode`] | Validated mutual fund scheme code |
//! | [`Symbol`] | Validated market-data ticker |
//! | [`Catalog`] | Static fund list and index lookup |
//!
//! Dates are `time::Date` values: no time of day and no offset. Anything
//! timezone-aware is reduced to its calendar date before it becomes a
//! [`TimeSeries`] key.

mod catalog;
mod scheme;
mod series;
mod symbol;

pub use catalog::{Catalog, FundEntry, IndexEntry};
pub use scheme::SchemeCode;
pub use series::{format_iso_date, parse_iso_date, DateRange, TimeSeries};
pub use symbol::Symbol;
