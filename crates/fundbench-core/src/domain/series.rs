use std::collections::BTreeMap;

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        ValidationError::InvalidDate {
            value: input.to_owned(),
        }
    })
}

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Inclusive calendar date range used by the series fetchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedDateRange {
                start: format_iso_date(start),
                end: format_iso_date(end),
            });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    pub const fn start(self) -> Date {
        self.start
    }

    pub const fn end(self) -> Date {
        self.end
    }

    pub fn contains(self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Date-keyed series of finite values, ascending and unique by date.
///
/// Keys carry no time of day and no offset. Sources that report
/// timezone-aware timestamps go through [`TimeSeries::from_timestamps`],
/// which keeps the wall-clock calendar date of each timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: BTreeMap<Date, f64>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point, replacing any value already stored for `date`.
    pub fn insert(&mut self, date: Date, value: f64) -> Result<Option<f64>, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                date: format_iso_date(date),
            });
        }
        Ok(self.points.insert(date, value))
    }

    pub fn from_points<I>(points: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        let mut series = Self::new();
        for (date, value) in points {
            series.insert(date, value)?;
        }
        Ok(series)
    }

    /// Build a series from offset-aware timestamps, dropping the offset
    /// without shifting the calendar date.
    pub fn from_timestamps<I>(points: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (OffsetDateTime, f64)>,
    {
        Self::from_points(points.into_iter().map(|(ts, value)| (ts.date(), value)))
    }

    pub fn get(&self, date: Date) -> Option<f64> {
        self.points.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(Date, f64)> {
        self.points
            .first_key_value()
            .map(|(date, value)| (*date, *value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.points.iter().map(|(date, value)| (*date, *value))
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.keys().copied()
    }

    /// Keep only points that fall inside `range`.
    pub fn within(mut self, range: DateRange) -> Self {
        self.points.retain(|date, _| range.contains(*date));
        self
    }

    /// Dates present in both series, ascending, with the value from each side.
    pub fn inner_join<'a>(
        &'a self,
        other: &'a TimeSeries,
    ) -> impl Iterator<Item = (Date, f64, f64)> + 'a {
        self.iter()
            .filter_map(move |(date, left)| other.get(date).map(|right| (date, left, right)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn keeps_points_sorted_and_unique() {
        let series = TimeSeries::from_points([
            (date!(2024 - 01 - 03), 3.0),
            (date!(2024 - 01 - 01), 1.0),
            (date!(2024 - 01 - 03), 4.0),
        ])
        .expect("finite values");

        let points: Vec<_> = series.iter().collect();
        assert_eq!(
            points,
            vec![(date!(2024 - 01 - 01), 1.0), (date!(2024 - 01 - 03), 4.0)]
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = TimeSeries::from_points([(date!(2024 - 01 - 01), f64::NAN)]).expect_err("nan");
        assert!(matches!(err, ValidationError::NonFiniteValue { .. }));
    }

    #[test]
    fn offset_timestamps_keep_their_calendar_date() {
        let series = TimeSeries::from_timestamps([
            (datetime!(2024-01-02 0:00 +5:30), 10.0),
            (datetime!(2024-01-03 23:59 -4), 11.0),
        ])
        .expect("finite values");

        let dates: Vec<_> = series.dates().collect();
        assert_eq!(dates, vec![date!(2024 - 01 - 02), date!(2024 - 01 - 03)]);
    }

    #[test]
    fn within_filters_inclusively() {
        let series = TimeSeries::from_points([
            (date!(2024 - 01 - 01), 1.0),
            (date!(2024 - 01 - 02), 2.0),
            (date!(2024 - 01 - 03), 3.0),
        ])
        .expect("finite values");
        let range = DateRange::new(date!(2024 - 01 - 02), date!(2024 - 01 - 03)).expect("ordered");

        let filtered = series.within(range);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.first(), Some((date!(2024 - 01 - 02), 2.0)));
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = DateRange::parse("2024-02-01", "2024-01-01").expect_err("inverted");
        assert!(matches!(err, ValidationError::InvertedDateRange { .. }));
        assert!(DateRange::parse("2024-01-01", "2024-01-01").is_ok());
    }

    #[test]
    fn parses_and_formats_iso_dates() {
        let parsed = parse_iso_date("2024-03-07").expect("iso date");
        assert_eq!(format_iso_date(parsed), "2024-03-07");
        assert!(matches!(
            parse_iso_date("07-03-2024"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }
}
