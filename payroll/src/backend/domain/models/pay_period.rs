//! Domain model for a bi-weekly pay period.
use chrono::{Days, NaiveDate};
use std::fmt;

/// Half-open interval `[start, end)` of exactly `LENGTH_DAYS` days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayPeriod {
    pub const LENGTH_DAYS: u64 = 14;

    /// Period beginning on `start`; `None` only at the end of the calendar
    pub fn starting(start: NaiveDate) -> Option<Self> {
        let end = start.checked_add_days(Days::new(Self::LENGTH_DAYS))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Last day that still belongs to the period
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.last_day().format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_is_half_open() {
        let period = PayPeriod::starting(date(2021, 1, 1)).unwrap();
        assert_eq!(period.end, date(2021, 1, 15));
        assert!(period.contains(date(2021, 1, 1)));
        assert!(period.contains(date(2021, 1, 14)));
        assert!(!period.contains(date(2021, 1, 15)));
        assert!(!period.contains(date(2020, 12, 31)));
    }

    #[test]
    fn test_display_shows_inclusive_last_day() {
        let period = PayPeriod::starting(date(2021, 12, 24)).unwrap();
        assert_eq!(period.to_string(), "2021-12-24 to 2022-01-06");
    }

    #[test]
    fn test_starting_at_calendar_end() {
        assert!(PayPeriod::starting(NaiveDate::MAX).is_none());
    }
}
