use chrono::NaiveDate;
use std::time::Instant;
use tracing::{info, warn};

use crate::dataset::BookingRecord;
use crate::dates;
use crate::error::RangeError;
use crate::stats::AggregationResult;

/// A start/end selection. Either side may still be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both bounds, provided they are set and `end` is strictly after `start`.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), RangeError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if end > start => Ok((start, end)),
            (Some(start), Some(end)) => Err(RangeError::NotIncreasing { start, end }),
            _ => Err(RangeError::Unset),
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Ok((start, end)) => within(date, start, end),
            Err(_) => false,
        }
    }
}

/// Inclusive on both ends.
fn within(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

/// Sums visitor counts per day and per country for records arriving within `range`.
///
/// Records are visited once, in order. A record whose month name or day
/// cannot form a real date is left out of every mapping. Records with no
/// visitors still register their day and country keys at zero.
///
/// # Errors
///
/// Returns [`RangeError::Unset`] or [`RangeError::NotIncreasing`] without
/// touching any record when the range is not valid.
pub fn aggregate(
    records: &[BookingRecord],
    range: &DateRange,
) -> Result<AggregationResult, RangeError> {
    let (start, end) = range.bounds()?;

    let start_time = Instant::now();
    info!(
        action = "start",
        component = "aggregation",
        start = %start,
        end = %end,
        record_count = records.len(),
        "Aggregating bookings over range"
    );

    let mut result = AggregationResult::default();
    let mut included = 0usize;
    let mut malformed = 0usize;

    for (row, record) in records.iter().enumerate() {
        let Some(arrival) = record.arrival_date() else {
            malformed += 1;
            warn!(
                action = "skip",
                component = "aggregation",
                row,
                year = record.arrival_year,
                month = %record.arrival_month_name,
                day = record.arrival_day_of_month,
                "Booking has no valid arrival date"
            );
            continue;
        };

        if !within(arrival, start, end) {
            continue;
        }
        included += 1;

        let total = record.total_visitors();
        let key = dates::format_date_key(arrival);

        result.visitors_per_country.add(&record.country, total);
        result.visitors_per_day.add(&key, total);
        result
            .adult_visitors_per_day
            .add(&key, u64::from(record.adults));
        result
            .children_visitors_per_day
            .add(&key, record.young_visitors());
    }

    info!(
        action = "complete",
        component = "aggregation",
        included,
        malformed,
        days = result.visitors_per_day.len(),
        countries = result.visitors_per_country.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Aggregation completed"
    );

    Ok(result)
}
