//! # Backend Module
//!
//! Contains all logic of the clinic payroll report.
//!
//! ## Architecture
//!
//! ```text
//! Binary (main.rs)
//!     ↓
//! IO Layer (schedule fetch, report delivery)
//!     ↓
//! Domain Layer (rates, pay periods, aggregation, rendering)
//! ```
//!
//! A run is a single synchronous pass: load configuration, fetch the
//! schedule, build the report, deliver it. Any failure aborts the run before
//! anything is delivered.

pub mod domain;
pub mod error;
pub mod io;

use chrono::NaiveDate;
use log::info;

use crate::backend::domain::{PayrollConfig, PayrollReport, PayrollService};
use crate::backend::io::{ConsoleSink, EmailService, ReportSink, ScheduleQuery, ScheduleSource};

pub use error::{PayrollError, PayrollResult};

/// Report destination selected by the configuration
pub fn report_sink(config: &PayrollConfig) -> PayrollResult<Box<dyn ReportSink>> {
    match &config.email {
        Some(email) => Ok(Box::new(EmailService::new(
            email.clone(),
            &config.report_recipients,
        )?)),
        None => Ok(Box::new(ConsoleSink)),
    }
}

/// Fetch, compute and deliver one report
pub fn run_payroll(
    config: &PayrollConfig,
    source: &dyn ScheduleSource,
    sink: &dyn ReportSink,
    today: NaiveDate,
) -> PayrollResult<PayrollReport> {
    let query = ScheduleQuery {
        min_date: config.pay_period_anchor_date,
    };
    let appointments = source.fetch_appointments(&query)?;

    let service = PayrollService::from_config(config);
    let report = service.build_report(&appointments, today)?;

    info!("Delivering report \"{}\"", report.subject);
    sink.deliver(&report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::Appointment;
    use crate::backend::domain::ConfigService;
    use std::cell::RefCell;

    const CONFIG: &str = r#"
schedule_endpoint = "https://scheduling.example.com/api/v1/appointments"
pay_period_anchor_date = "2021-01-01"
report_subject = "Clinic payroll"

[auth]
user_id = "12345"
api_key = "secret-key"

[pay_scales."2021-01-01"]
"30-minute" = "40.00"
"#;

    struct StaticSource {
        appointments: Vec<Appointment>,
        queries: RefCell<Vec<ScheduleQuery>>,
    }

    impl ScheduleSource for StaticSource {
        fn fetch_appointments(&self, query: &ScheduleQuery) -> PayrollResult<Vec<Appointment>> {
            self.queries.borrow_mut().push(*query);
            Ok(self.appointments.clone())
        }
    }

    struct FailingSource;

    impl ScheduleSource for FailingSource {
        fn fetch_appointments(&self, _query: &ScheduleQuery) -> PayrollResult<Vec<Appointment>> {
            Err(PayrollError::ScheduleFetchFailed("provider answered 401 Unauthorized".to_string()))
        }
    }

    #[derive(Default)]
    struct CapturingSink {
        delivered: RefCell<Vec<PayrollReport>>,
    }

    impl ReportSink for CapturingSink {
        fn deliver(&self, report: &PayrollReport) -> PayrollResult<()> {
            self.delivered.borrow_mut().push(report.clone());
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_appointment(start: &str) -> Appointment {
        let start = chrono::DateTime::parse_from_rfc3339(start).unwrap();
        Appointment {
            client_first_name: "Jane".to_string(),
            client_last_name: "Doe".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::minutes(30),
            duration_minutes: 30,
            intake_answers: Vec::new(),
        }
    }

    #[test]
    fn test_run_payroll_fetches_from_anchor_and_delivers_once() {
        let config = ConfigService::parse_config(CONFIG).unwrap();
        let source = StaticSource {
            appointments: vec![
                create_test_appointment("2021-01-05T09:00:00-05:00"),
                create_test_appointment("2021-01-06T09:00:00-05:00"),
            ],
            queries: RefCell::new(Vec::new()),
        };
        let sink = CapturingSink::default();

        let report = run_payroll(&config, &source, &sink, date(2021, 1, 6)).unwrap();

        assert_eq!(source.queries.borrow()[0].min_date, date(2021, 1, 1));
        assert_eq!(sink.delivered.borrow().as_slice(), &[report.clone()]);
        assert_eq!(report.subject, "Clinic payroll (1 appointment today)");
        assert!(report.body.contains("30-minute: 2 at $40.0 each = $80.0"));
    }

    #[test]
    fn test_fetch_failure_delivers_nothing() {
        let config = ConfigService::parse_config(CONFIG).unwrap();
        let sink = CapturingSink::default();

        let err = run_payroll(&config, &FailingSource, &sink, date(2021, 1, 6)).unwrap_err();

        assert!(matches!(err, PayrollError::ScheduleFetchFailed(_)));
        assert!(sink.delivered.borrow().is_empty());
    }

    #[test]
    fn test_console_sink_without_email_block() {
        let config = ConfigService::parse_config(CONFIG).unwrap();
        assert!(report_sink(&config).is_ok());
    }
}
