use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive calendar date range bounding one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Range covering the `months` months leading up to `today`.
    pub fn trailing_months(today: NaiveDate, months: u32) -> Self {
        let from = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }

    /// Range covering the `months` months following `today`.
    pub fn coming_months(today: NaiveDate, months: u32) -> Self {
        let to = today
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX);
        Self { from: today, to }
    }

    /// True when `from` falls after `to`; such ranges aggregate to nothing.
    pub fn is_empty(&self) -> bool {
        self.from > self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trailing_months_anchors_at_today() {
        let range = DateRange::trailing_months(date(2024, 3, 15), 2);
        assert_eq!(range.from, date(2024, 1, 15));
        assert_eq!(range.to, date(2024, 3, 15));
        assert!(!range.is_empty());
    }

    #[test]
    fn coming_months_clamps_month_end() {
        let range = DateRange::coming_months(date(2024, 1, 31), 1);
        assert_eq!(range.to, date(2024, 2, 29));
    }

    #[test]
    fn inverted_range_is_empty() {
        let range = DateRange::new(date(2024, 5, 1), date(2024, 4, 1));
        assert!(range.is_empty());
    }

    #[test]
    fn serializes_as_iso_dates() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 4, 1));
        let value = serde_json::to_value(range).unwrap();
        assert_eq!(value["from"], "2024-01-01");
        assert_eq!(value["to"], "2024-04-01");
    }
}
