//! Bi-weekly pay period generation.
//!
//! Periods are laid end to end from a configured anchor date. Generation stops
//! at the first period whose start is after the `through` date, so the last
//! period returned is the one containing `through` and may still be running.

use chrono::NaiveDate;

use crate::backend::domain::models::PayPeriod;

/// Restartable description of the period sequence between two dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSegmenter {
    anchor_date: NaiveDate,
    through_date: NaiveDate,
}

impl PeriodSegmenter {
    pub fn new(anchor_date: NaiveDate, through_date: NaiveDate) -> Self {
        Self {
            anchor_date,
            through_date,
        }
    }

    /// A fresh iterator over the periods, oldest first
    pub fn periods(&self) -> PayPeriods {
        PayPeriods {
            next_start: Some(self.anchor_date),
            through_date: self.through_date,
        }
    }
}

impl IntoIterator for PeriodSegmenter {
    type Item = PayPeriod;
    type IntoIter = PayPeriods;

    fn into_iter(self) -> PayPeriods {
        self.periods()
    }
}

/// Lazy iterator produced by [`PeriodSegmenter::periods`]
#[derive(Debug, Clone)]
pub struct PayPeriods {
    next_start: Option<NaiveDate>,
    through_date: NaiveDate,
}

impl Iterator for PayPeriods {
    type Item = PayPeriod;

    fn next(&mut self) -> Option<PayPeriod> {
        let start = self.next_start.filter(|start| *start <= self.through_date)?;
        let period = PayPeriod::starting(start);
        self.next_start = period.map(|p| p.end);
        period
    }
}

/// Convenience form of `PeriodSegmenter::new(anchor, through).periods()`
pub fn periods(anchor_date: NaiveDate, through_date: NaiveDate) -> PayPeriods {
    PeriodSegmenter::new(anchor_date, through_date).periods()
}
