//! Per-period income aggregation.
//!
//! Each appointment is priced through the `RateTable` on its start date and
//! counted under its (duration, rate) key. Sums are accumulated in input
//! order with `Decimal`, so totals are exact and reproducible.

use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::backend::domain::models::{Appointment, DurationRateKey, PayPeriod};
use crate::backend::domain::rate_table::RateTable;
use crate::backend::error::PayrollResult;

/// Totals for one set of appointments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    pub total_income: Decimal,
    pub total_count: usize,
    pub per_key_counts: BTreeMap<DurationRateKey, usize>,
}

impl AggregateResult {
    pub fn count_for(&self, key: &DurationRateKey) -> usize {
        self.per_key_counts.get(key).copied().unwrap_or(0)
    }

    /// Unit rate times the number of appointments billed under `key`
    pub fn extended_total(&self, key: &DurationRateKey) -> Decimal {
        key.rate * Decimal::from(self.count_for(key))
    }
}

/// Aggregate for one pay period
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodIncome {
    pub period: PayPeriod,
    pub result: AggregateResult,
}

pub struct IncomeAggregator<'a> {
    rate_table: &'a RateTable,
}

impl<'a> IncomeAggregator<'a> {
    pub fn new(rate_table: &'a RateTable) -> Self {
        Self { rate_table }
    }

    pub fn aggregate<'b, I>(&self, appointments: I) -> PayrollResult<AggregateResult>
    where
        I: IntoIterator<Item = &'b Appointment>,
    {
        let mut result = AggregateResult::default();
        for appointment in appointments {
            let key = self
                .rate_table
                .resolve_key(appointment.start_date(), &appointment.duration_label())?;
            result.total_income += key.rate;
            result.total_count += 1;
            *result.per_key_counts.entry(key).or_insert(0) += 1;
        }
        Ok(result)
    }

    /// Aggregate only the appointments whose start date falls in `period`
    pub fn aggregate_period(
        &self,
        appointments: &[Appointment],
        period: PayPeriod,
    ) -> PayrollResult<PeriodIncome> {
        let result = self.aggregate(
            appointments
                .iter()
                .filter(|appointment| period.contains(appointment.start_date())),
        )?;
        debug!(
            "Pay period {}: {} appointments, ${}",
            period, result.total_count, result.total_income
        );
        Ok(PeriodIncome { period, result })
    }
}
