use log::info;
use std::io::Write;

use crate::backend::domain::payroll_service::PayrollReport;
use crate::backend::error::{PayrollError, PayrollResult};

/// Destination for a finished report
pub trait ReportSink {
    fn deliver(&self, report: &PayrollReport) -> PayrollResult<()>;
}

/// Writes the report to standard output
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn write_to<W: Write>(&self, out: &mut W, report: &PayrollReport) -> std::io::Result<()> {
        writeln!(out, "{}", report.subject)?;
        writeln!(out)?;
        write!(out, "{}", report.body)?;
        out.flush()
    }
}

impl ReportSink for ConsoleSink {
    fn deliver(&self, report: &PayrollReport) -> PayrollResult<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_to(&mut lock, report)
            .map_err(|e| PayrollError::DeliveryFailed(format!("failed to write report: {}", e)))?;
        info!("Payroll report written to standard output");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_layout() {
        let report = PayrollReport {
            subject: "Clinic payroll (0 appointments today)".to_string(),
            body: "Upcoming Appointments:\nNone\n".to_string(),
        };
        let mut out = Vec::new();
        ConsoleSink.write_to(&mut out, &report).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Clinic payroll (0 appointments today)\n\nUpcoming Appointments:\nNone\n"
        );
    }
}
