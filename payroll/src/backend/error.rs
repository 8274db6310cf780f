//! Errors that abort a payroll run.
//!
//! Every variant is fatal: the run stops and nothing is delivered. Two
//! conditions that look like errors are deliberately absent here. A missing
//! intake answer is just "no reason" (`None`), and a duration label that the
//! applicable pay scale does not list is priced at zero.

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum PayrollError {
    #[error("Configuration missing or invalid: {0}")]
    ConfigMissingOrInvalid(String),
    #[error("Schedule fetch failed: {0}")]
    ScheduleFetchFailed(String),
    #[error("No pay scale version is effective on or before {date}")]
    NoApplicableRateVersion { date: NaiveDate },
    #[error("Invalid appointment record: {0}")]
    InvalidAppointmentRecord(String),
    #[error("Report delivery failed: {0}")]
    DeliveryFailed(String),
}

pub type PayrollResult<T> = Result<T, PayrollError>;
