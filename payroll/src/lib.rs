pub mod backend;

pub use backend::{report_sink, run_payroll, PayrollError, PayrollResult};
