use chrono::NaiveDate;
use log::info;

use crate::backend::domain::config_service::PayrollConfig;
use crate::backend::domain::income_aggregator::{IncomeAggregator, PeriodIncome};
use crate::backend::domain::models::Appointment;
use crate::backend::domain::period_segmenter::PeriodSegmenter;
use crate::backend::domain::rate_table::RateTable;
use crate::backend::domain::report_renderer::{
    appointments_on, upcoming_visits, ReportBuffer, ReportRenderer,
};
use crate::backend::domain::visit_rank::VisitRankAssigner;
use crate::backend::error::PayrollResult;

/// Finished report, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollReport {
    pub subject: String,
    pub body: String,
}

/// Service that reconciles the schedule against the pay scales
#[derive(Debug, Clone)]
pub struct PayrollService {
    rate_table: RateTable,
    anchor_date: NaiveDate,
    report_subject: String,
    renderer: ReportRenderer,
}

impl PayrollService {
    pub fn new(
        rate_table: RateTable,
        anchor_date: NaiveDate,
        report_subject: impl Into<String>,
        renderer: ReportRenderer,
    ) -> Self {
        Self {
            rate_table,
            anchor_date,
            report_subject: report_subject.into(),
            renderer,
        }
    }

    pub fn from_config(config: &PayrollConfig) -> Self {
        Self::new(
            config.rate_table.clone(),
            config.pay_period_anchor_date,
            config.report_subject.clone(),
            ReportRenderer::with_reason_field(config.reason_field_id),
        )
    }

    /// Income for every pay period from the anchor up to the one containing `today`
    pub fn period_incomes(
        &self,
        appointments: &[Appointment],
        today: NaiveDate,
    ) -> PayrollResult<Vec<PeriodIncome>> {
        let aggregator = IncomeAggregator::new(&self.rate_table);
        PeriodSegmenter::new(self.anchor_date, today)
            .periods()
            .map(|period| aggregator.aggregate_period(appointments, period))
            .collect()
    }

    /// Build the full report for `today`. Fails without producing any text if
    /// a billed appointment cannot be priced.
    pub fn build_report(
        &self,
        appointments: &[Appointment],
        today: NaiveDate,
    ) -> PayrollResult<PayrollReport> {
        info!(
            "Building payroll report for {} with {} appointments",
            today,
            appointments.len()
        );

        let ranks = VisitRankAssigner::assign(appointments);
        let upcoming = upcoming_visits(appointments, &ranks, today);
        let periods = self.period_incomes(appointments, today)?;
        let keys = self.rate_table.distinct_keys();

        info!(
            "{} upcoming appointments, {} pay periods, {} rate keys",
            upcoming.len(),
            periods.len(),
            keys.len()
        );

        let body = self
            .renderer
            .render(ReportBuffer::new(), &upcoming, &periods, &keys)
            .into_text();
        let subject = self
            .renderer
            .subject(&self.report_subject, appointments_on(appointments, today));

        Ok(PayrollReport { subject, body })
    }
}
