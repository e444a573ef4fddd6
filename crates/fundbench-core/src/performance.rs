//! Fund-versus-index alignment and base-100 normalization.
//!
//! [`PerformanceAligner::align`] turns two independently fetched series into
//! one chart-ready [`ComparisonPayload`]:
//!
//! 1. inner-join both series on calendar date, ascending;
//! 2. compute padded axis bounds per column from the raw values;
//! 3. rebase each column to 100 at the first joined date;
//! 4. round values to two decimals and format dates as `YYYY-MM-DD`.
//!
//! Absent input, empty input, and a join without shared dates all produce
//! `None`. The aligner never fails otherwise.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, info, warn};

use crate::{format_iso_date, TimeSeries};

/// Share of the raw value span added below the minimum and above the maximum.
pub const MARGIN_RATIO: f64 = 0.05;

/// Base value of a rebased series at its first date.
pub const BASE_VALUE: f64 = 100.0;

/// Axis bounds of one column, padded by [`MARGIN_RATIO`] of its span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

impl RangeBounds {
    pub fn with_margin<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(min, max), value| {
            (min.min(value), max.max(value))
        });

        let margin = (max - min) * MARGIN_RATIO;
        Some(Self {
            min: min - margin,
            max: max + margin,
        })
    }
}

/// One joined date with both values present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRow {
    pub date: Date,
    pub fund: f64,
    pub index: f64,
}

/// Rows for the dates present in both series, ascending by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedFrame {
    rows: Vec<AlignedRow>,
}

impl AlignedFrame {
    pub fn join(fund: &TimeSeries, index: &TimeSeries) -> Self {
        let rows = fund
            .inner_join(index)
            .map(|(date, fund, index)| AlignedRow { date, fund, index })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn fund_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.fund)
    }

    pub fn index_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.index)
    }

    /// Rebase both columns to [`BASE_VALUE`] at the first row.
    ///
    /// When either first-row value is exactly zero neither column is rebased
    /// and the raw values come back unchanged, with `rebased == false`.
    pub fn normalize(&self) -> Normalized {
        let Some(first) = self.rows.first() else {
            return Normalized::default();
        };

        if first.fund == 0.0 || first.index == 0.0 {
            return Normalized {
                fund: self.fund_values().collect(),
                index: self.index_values().collect(),
                rebased: false,
            };
        }

        Normalized {
            fund: self
                .fund_values()
                .map(|value| value / first.fund * BASE_VALUE)
                .collect(),
            index: self
                .index_values()
                .map(|value| value / first.index * BASE_VALUE)
                .collect(),
            rebased: true,
        }
    }
}

/// Performance columns produced by [`AlignedFrame::normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub fund: Vec<f64>,
    pub index: Vec<f64>,
    pub rebased: bool,
}

/// Chart payload for one fund-versus-index comparison.
///
/// When the first joined row holds a zero, the performance columns carry the
/// actual values instead of rebased ones; consumers see identical columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPayload {
    pub labels: Vec<String>,
    pub fund_performance: Vec<f64>,
    pub index_performance: Vec<f64>,
    pub fund_actual_values: Vec<f64>,
    pub index_actual_values: Vec<f64>,
    pub fund_min: f64,
    pub fund_max: f64,
    pub index_min: f64,
    pub index_max: f64,
    pub fund_name: String,
    pub index_name: String,
}

/// Joins, rebases, and serializes a fund series against an index series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceAligner {
    fund_name: String,
    index_name: String,
}

impl PerformanceAligner {
    pub fn new(fund_name: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            fund_name: fund_name.into(),
            index_name: index_name.into(),
        }
    }

    pub fn align(
        &self,
        fund: Option<&TimeSeries>,
        index: Option<&TimeSeries>,
    ) -> Option<ComparisonPayload> {
        let (Some(fund), Some(index)) = (fund, index) else {
            debug!("alignment skipped: a series is absent");
            return None;
        };
        if fund.is_empty() || index.is_empty() {
            debug!(
                fund_points = fund.len(),
                index_points = index.len(),
                "alignment skipped: a series is empty"
            );
            return None;
        }

        let frame = AlignedFrame::join(fund, index);
        if frame.is_empty() {
            info!(
                fund_points = fund.len(),
                index_points = index.len(),
                "no overlapping dates between fund and index"
            );
            return None;
        }

        let fund_bounds = RangeBounds::with_margin(frame.fund_values())?;
        let index_bounds = RangeBounds::with_margin(frame.index_values())?;

        let normalized = frame.normalize();
        if !normalized.rebased {
            warn!(
                fund = %self.fund_name,
                index = %self.index_name,
                "first aligned row contains zero; performance columns carry actual values"
            );
        }

        debug!(rows = frame.len(), "aligned fund and index series");

        Some(ComparisonPayload {
            labels: frame
                .rows()
                .iter()
                .map(|row| format_iso_date(row.date))
                .collect(),
            fund_performance: normalized.fund.into_iter().map(round_2dp).collect(),
            index_performance: normalized.index.into_iter().map(round_2dp).collect(),
            fund_actual_values: frame.fund_values().map(round_2dp).collect(),
            index_actual_values: frame.index_values().map(round_2dp).collect(),
            fund_min: fund_bounds.min,
            fund_max: fund_bounds.max,
            index_min: index_bounds.min,
            index_max: index_bounds.max,
            fund_name: self.fund_name.clone(),
            index_name: self.index_name.clone(),
        })
    }
}

/// Round to two decimals, ties away from zero, on the value's shortest
/// decimal form (so `99.995` becomes `100.0`).
pub fn round_2dp(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    match Decimal::from_str(&value.to_string()) {
        Ok(decimal) => decimal
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        // Beyond Decimal's 28 digits two decimals are below f64 precision anyway.
        Err(_) => value,
    }
}
