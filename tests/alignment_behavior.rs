//! Behavior-driven tests for fund-versus-index alignment
//!
//! These tests verify how two independently fetched series become one chart
//! payload: which dates survive the join, where the rebase anchors, and how
//! degenerate inputs are reported.

use fundbench_core::{round_2dp, AlignedFrame, PerformanceAligner, RangeBounds, TimeSeries};
use time::macros::{date, datetime};
use time::Date;

fn series(points: &[(Date, f64)]) -> TimeSeries {
    TimeSeries::from_points(points.iter().copied()).expect("finite values")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Join
// =============================================================================

#[test]
fn when_series_share_some_dates_only_shared_dates_are_charted() {
    // Given: A fund with a holiday the index traded through, and vice versa
    let fund = series(&[
        (date!(2024 - 03 - 01), 50.0),
        (date!(2024 - 03 - 04), 51.0),
        (date!(2024 - 03 - 05), 52.0),
        (date!(2024 - 03 - 07), 53.0),
    ]);
    let index = series(&[
        (date!(2024 - 03 - 01), 22000.0),
        (date!(2024 - 03 - 05), 22100.0),
        (date!(2024 - 03 - 06), 22200.0),
        (date!(2024 - 03 - 07), 22300.0),
    ]);

    // When: The series are aligned
    let payload = PerformanceAligner::new("Fund", "Nifty 50")
        .align(Some(&fund), Some(&index))
        .expect("overlapping dates");

    // Then: Labels are exactly the intersection, ascending
    assert_eq!(payload.labels, vec!["2024-03-01", "2024-03-05", "2024-03-07"]);
    assert_eq!(payload.fund_actual_values, vec![50.0, 52.0, 53.0]);
    assert_eq!(payload.index_actual_values, vec![22000.0, 22100.0, 22300.0]);

    // And: Every column has one entry per label
    let rows = payload.labels.len();
    assert_eq!(payload.fund_performance.len(), rows);
    assert_eq!(payload.index_performance.len(), rows);
}

#[test]
fn when_series_share_no_dates_alignment_reports_nothing() {
    // Given: Disjoint series
    let fund = series(&[(date!(2024 - 01 - 01), 10.0)]);
    let index = series(&[(date!(2024 - 01 - 02), 1000.0)]);

    // When / Then: No payload is produced
    assert!(AlignedFrame::join(&fund, &index).is_empty());
    assert_eq!(
        PerformanceAligner::new("Fund", "Index").align(Some(&fund), Some(&index)),
        None
    );
}

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn performance_columns_start_at_one_hundred() {
    // Given: Arbitrary positive first values
    let fund = series(&[(date!(2024 - 01 - 01), 37.21), (date!(2024 - 01 - 02), 40.0)]);
    let index = series(&[
        (date!(2024 - 01 - 01), 19876.5),
        (date!(2024 - 01 - 02), 19000.0),
    ]);

    // When: The series are aligned
    let payload = PerformanceAligner::new("Fund", "Index")
        .align(Some(&fund), Some(&index))
        .expect("overlapping dates");

    // Then: Both columns are anchored at exactly 100
    assert_eq!(payload.fund_performance[0], 100.0);
    assert_eq!(payload.index_performance[0], 100.0);
}

#[test]
fn when_first_fund_value_is_zero_neither_column_is_rebased() {
    // Given: A fund whose first aligned NAV is zero
    let fund = series(&[(date!(2024 - 01 - 01), 0.0), (date!(2024 - 01 - 02), 2.5)]);
    let index = series(&[(date!(2024 - 01 - 01), 200.0), (date!(2024 - 01 - 02), 210.0)]);

    // When: The series are aligned
    let payload = PerformanceAligner::new("Fund", "Index")
        .align(Some(&fund), Some(&index))
        .expect("overlapping dates");

    // Then: Performance columns carry the actual values and nothing is infinite
    assert_eq!(payload.fund_performance, vec![0.0, 2.5]);
    assert_eq!(payload.index_performance, vec![200.0, 210.0]);
    assert!(payload
        .fund_performance
        .iter()
        .chain(&payload.index_performance)
        .all(|value| value.is_finite()));
}

// =============================================================================
// Degenerate Input
// =============================================================================

#[test]
fn absent_or_empty_input_produces_no_payload() {
    let aligner = PerformanceAligner::new("Fund", "Index");
    let populated = series(&[(date!(2024 - 01 - 01), 1.0)]);
    let empty = TimeSeries::new();

    assert_eq!(aligner.align(None, Some(&populated)), None);
    assert_eq!(aligner.align(Some(&populated), None), None);
    assert_eq!(aligner.align(None, None), None);
    assert_eq!(aligner.align(Some(&empty), Some(&populated)), None);
    assert_eq!(aligner.align(Some(&populated), Some(&empty)), None);
    assert_eq!(aligner.align(Some(&empty), Some(&empty)), None);
}

// =============================================================================
// Bounds and Rounding
// =============================================================================

#[test]
fn bounds_are_padded_by_five_percent_of_the_raw_span() {
    let bounds = RangeBounds::with_margin([100.0, 110.0, 90.0]).expect("values");
    assert_close(bounds.min, 89.0);
    assert_close(bounds.max, 111.0);
}

#[test]
fn values_round_to_two_decimals_half_away_from_zero() {
    assert_eq!(round_2dp(100.456), 100.46);
    assert_eq!(round_2dp(99.995), 100.0);
    assert_eq!(round_2dp(100.0), 100.0);
}

// =============================================================================
// End to End
// =============================================================================

#[test]
fn three_day_comparison_produces_the_expected_payload() {
    // Given: Three shared trading days
    let fund = series(&[
        (date!(2024 - 01 - 01), 10.0),
        (date!(2024 - 01 - 02), 10.5),
        (date!(2024 - 01 - 03), 11.0),
    ]);
    let index = series(&[
        (date!(2024 - 01 - 01), 1000.0),
        (date!(2024 - 01 - 02), 1010.0),
        (date!(2024 - 01 - 03), 1005.0),
    ]);

    // When: The series are aligned
    let payload = PerformanceAligner::new("Example Fund", "Nifty 50")
        .align(Some(&fund), Some(&index))
        .expect("overlapping dates");

    // Then: Rebased and actual columns match the inputs
    assert_eq!(payload.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(payload.fund_performance, vec![100.0, 105.0, 110.0]);
    assert_eq!(payload.index_performance, vec![100.0, 101.0, 100.5]);
    assert_eq!(payload.fund_actual_values, vec![10.0, 10.5, 11.0]);
    assert_eq!(payload.index_actual_values, vec![1000.0, 1010.0, 1005.0]);

    // And: Bounds pad the raw span by 5% on each side
    assert_close(payload.fund_min, 9.95);
    assert_close(payload.fund_max, 11.05);
    assert_close(payload.index_min, 999.5);
    assert_close(payload.index_max, 1010.5);

    // And: Names pass through
    assert_eq!(payload.fund_name, "Example Fund");
    assert_eq!(payload.index_name, "Nifty 50");
}

#[test]
fn payload_serializes_with_snake_case_keys() {
    let fund = series(&[(date!(2024 - 01 - 01), 10.0)]);
    let index = series(&[(date!(2024 - 01 - 01), 1000.0)]);
    let payload = PerformanceAligner::new("Fund", "Index")
        .align(Some(&fund), Some(&index))
        .expect("overlapping dates");

    let json = serde_json::to_value(&payload).expect("serializable");
    for key in [
        "labels",
        "fund_performance",
        "index_performance",
        "fund_actual_values",
        "index_actual_values",
        "fund_min",
        "fund_max",
        "index_min",
        "index_max",
        "fund_name",
        "index_name",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
}

// =============================================================================
// Timezone Normalization
// =============================================================================

#[test]
fn exchange_local_timestamps_join_with_plain_dates() {
    // Given: Index closes stamped at exchange-local midnight in +05:30
    let fund = series(&[(date!(2024 - 01 - 02), 10.0), (date!(2024 - 01 - 03), 10.2)]);
    let index = TimeSeries::from_timestamps([
        (datetime!(2024-01-02 0:00 +5:30), 21000.0),
        (datetime!(2024-01-03 0:00 +5:30), 21420.0),
    ])
    .expect("finite values");

    // When: The series are aligned
    let payload = PerformanceAligner::new("Fund", "Index")
        .align(Some(&fund), Some(&index))
        .expect("overlapping dates");

    // Then: The calendar dates match instead of shifting to the previous UTC day
    assert_eq!(payload.labels, vec!["2024-01-02", "2024-01-03"]);
    assert_eq!(payload.index_performance, vec![100.0, 102.0]);
}
