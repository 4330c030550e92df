//! Calendar-month partitioning of a date range.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::DateRange;

/// Display format for a bucket's start date, e.g. "Jan 15, 2024".
const DATE_LABEL_FORMAT: &str = "%b %d, %Y";

/// Display format for a bucket's month, e.g. "Jan 2024".
const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// One month-long slice of a requested range.
///
/// Buckets anchor at the range's `from` day and step by whole months, so a
/// range starting mid-month produces mid-month buckets. `is_future` routes
/// the bucket into forecasting instead of actual-invoice aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// Bucket start, also the `from` of its invoice window.
    #[serde(rename = "iso")]
    pub start: NaiveDate,
    /// Start rendered for display.
    #[serde(rename = "date")]
    pub label: String,
    /// Month rendered for display.
    #[serde(rename = "month")]
    pub month_label: String,
    /// True when the bucket's end hasn't elapsed yet.
    #[serde(rename = "isFutureDate")]
    pub is_future: bool,
}

impl MonthBucket {
    /// Exclusive end of the `[start, start + 1 month)` window this bucket
    /// covers.
    pub fn window_end(&self) -> NaiveDate {
        plus_months(self.start, 1)
    }
}

/// Splits `range` into month buckets anchored at `range.from`.
///
/// Buckets are emitted while their start is on or before `range.to`, so the
/// final bucket may reach past the range end; an inverted range yields no
/// buckets at all. Stepping compounds through chrono's clamped month
/// addition (Jan 31 steps to Feb 28, then Mar 28).
pub fn month_buckets(range: &DateRange, today: NaiveDate) -> Vec<MonthBucket> {
    let mut buckets = Vec::new();
    let mut current = range.from;

    while current <= range.to {
        let next = plus_months(current, 1);
        buckets.push(MonthBucket {
            start: current,
            label: current.format(DATE_LABEL_FORMAT).to_string(),
            month_label: current.format(MONTH_LABEL_FORMAT).to_string(),
            is_future: next > today,
        });
        if next <= current {
            // Saturated at the calendar edge; nothing further to slice.
            break;
        }
        current = next;
    }

    buckets
}

/// Number of whole calendar months from `from` to `to`.
///
/// A month only counts once it has fully elapsed: Jan 15 to Apr 14 is 2,
/// Jan 15 to Apr 15 is 3. Month-end clamping counts as a full month
/// (Jan 31 to Feb 28 is 1). Inverted ranges yield 0, never negatives.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }

    let raw = (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if raw <= 0 {
        return 0;
    }

    // The raw year/month delta overshoots by one when the final month has
    // not fully elapsed.
    let anchor = plus_months(from, raw as u32);
    if anchor > to {
        (raw - 1) as u32
    } else {
        raw as u32
    }
}

/// Month addition with chrono's day-clamping, saturating at the calendar edge.
fn plus_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn buckets_step_by_whole_months() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 4, 1));
        let buckets = month_buckets(&range, date(2024, 6, 1));

        let starts: Vec<NaiveDate> = buckets.iter().map(|b| b.start).collect();
        assert_eq!(
            starts,
            vec![
                date(2024, 1, 1),
                date(2024, 2, 1),
                date(2024, 3, 1),
                date(2024, 4, 1),
            ]
        );
    }

    #[test]
    fn mid_month_anchor_produces_mid_month_buckets() {
        let range = DateRange::new(date(2024, 1, 15), date(2024, 3, 20));
        let buckets = month_buckets(&range, date(2024, 6, 1));

        let starts: Vec<NaiveDate> = buckets.iter().map(|b| b.start).collect();
        assert_eq!(
            starts,
            vec![date(2024, 1, 15), date(2024, 2, 15), date(2024, 3, 15)]
        );
    }

    #[test]
    fn month_end_anchor_clamps_and_compounds() {
        let range = DateRange::new(date(2024, 1, 31), date(2024, 4, 30));
        let buckets = month_buckets(&range, date(2024, 6, 1));

        let starts: Vec<NaiveDate> = buckets.iter().map(|b| b.start).collect();
        // Once clamped to the 28th/29th, stepping stays there.
        assert_eq!(
            starts,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 29),
                date(2024, 4, 29),
            ]
        );
    }

    #[test]
    fn inverted_range_yields_no_buckets() {
        let range = DateRange::new(date(2024, 5, 1), date(2024, 4, 1));
        assert!(month_buckets(&range, date(2024, 6, 1)).is_empty());
    }

    #[test]
    fn single_day_range_yields_one_bucket() {
        let range = DateRange::new(date(2024, 3, 10), date(2024, 3, 10));
        let buckets = month_buckets(&range, date(2024, 6, 1));
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].start, date(2024, 3, 10));
    }

    #[test]
    fn bucket_is_future_once_its_end_passes_today() {
        let today = date(2024, 3, 10);
        let range = DateRange::new(date(2024, 1, 1), date(2024, 5, 1));
        let buckets = month_buckets(&range, today);

        // Jan and Feb buckets have fully elapsed; the Mar 1 bucket ends
        // Apr 1, which is still ahead of today.
        let flags: Vec<bool> = buckets.iter().map(|b| b.is_future).collect();
        assert_eq!(flags, vec![false, false, true, true, true]);
    }

    #[test]
    fn bucket_ending_exactly_today_is_not_future() {
        let today = date(2024, 3, 1);
        let range = DateRange::new(date(2024, 2, 1), date(2024, 2, 1));
        let buckets = month_buckets(&range, today);
        assert!(!buckets[0].is_future);
    }

    #[test]
    fn bucket_labels_render_start_and_month() {
        let range = DateRange::new(date(2024, 1, 15), date(2024, 1, 15));
        let buckets = month_buckets(&range, date(2024, 6, 1));
        assert_eq!(buckets[0].label, "Jan 15, 2024");
        assert_eq!(buckets[0].month_label, "Jan 2024");
    }

    #[test]
    fn bucket_serializes_with_display_fields() {
        let range = DateRange::new(date(2024, 1, 15), date(2024, 1, 15));
        let buckets = month_buckets(&range, date(2024, 6, 1));
        let value = serde_json::to_value(&buckets[0]).unwrap();
        assert_eq!(value["iso"], "2024-01-15");
        assert_eq!(value["date"], "Jan 15, 2024");
        assert_eq!(value["month"], "Jan 2024");
        assert_eq!(value["isFutureDate"], true);
    }

    #[test]
    fn window_end_is_one_clamped_month_out() {
        let range = DateRange::new(date(2024, 1, 31), date(2024, 1, 31));
        let buckets = month_buckets(&range, date(2024, 6, 1));
        assert_eq!(buckets[0].window_end(), date(2024, 2, 29));
    }

    #[test]
    fn whole_months_counts_only_elapsed_months() {
        assert_eq!(whole_months_between(date(2024, 1, 1), date(2024, 4, 1)), 3);
        assert_eq!(whole_months_between(date(2024, 1, 15), date(2024, 4, 15)), 3);
        assert_eq!(whole_months_between(date(2024, 1, 15), date(2024, 4, 14)), 2);
        assert_eq!(whole_months_between(date(2024, 8, 30), date(2024, 9, 29)), 0);
    }

    #[test]
    fn whole_months_treats_clamped_month_end_as_elapsed() {
        assert_eq!(whole_months_between(date(2024, 1, 31), date(2024, 2, 29)), 1);
        assert_eq!(whole_months_between(date(2023, 1, 31), date(2023, 2, 28)), 1);
    }

    #[test]
    fn whole_months_never_goes_negative() {
        assert_eq!(whole_months_between(date(2024, 4, 1), date(2024, 1, 1)), 0);
        assert_eq!(whole_months_between(date(2024, 4, 1), date(2024, 4, 1)), 0);
        assert_eq!(whole_months_between(date(2024, 12, 20), date(2025, 1, 10)), 0);
    }

    #[test]
    fn whole_months_is_monotonic_in_the_end_date() {
        let from = date(2024, 1, 31);
        let mut previous = 0;
        for offset in 0..430 {
            let to = from + chrono::Duration::days(offset);
            let months = whole_months_between(from, to);
            assert!(
                months >= previous,
                "dropped from {previous} to {months} at {to}"
            );
            previous = months;
        }
        assert_eq!(previous, 14);
    }
}
