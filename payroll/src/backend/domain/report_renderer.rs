//! Report text rendering.
//!
//! This module turns computed payroll data into the plain-text report that is
//! printed or e-mailed. It owns no state between runs: text accumulates in a
//! `ReportBuffer` that is passed in and handed back by every render step.
//!
//! ## Layout
//!
//! ```text
//! Upcoming Appointments:
//! Tuesday January 5 10:00 AM - 10:30 AM: Jane Doe (30 min), 2nd visit, Back pain
//!
//! Pay Period: 2021-01-01 to 2021-01-14
//! 30-minute: 3 at $40.0 each = $120.0
//! Total Income: $120.00
//! Total Appointments: 3
//! ```
//!
//! - Upcoming appointments start on or after today, earliest first.
//! - The visit ordinal is only shown for clients with more than one visit.
//! - The reason is the trimmed intake answer for the configured field, if any.
//! - Every (duration, rate) pair from the whole pay scale history is listed
//!   for a period only when the period billed it at least once.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::backend::domain::income_aggregator::PeriodIncome;
use crate::backend::domain::models::{Appointment, DurationRateKey};
use crate::backend::domain::visit_rank::{ordinal, VisitRanks};

/// Intake form field holding the client's reason for the visit
pub const DEFAULT_REASON_FIELD_ID: i64 = 5_184_927;

/// Text accumulated while rendering one report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBuffer {
    text: String,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: impl AsRef<str>) -> Self {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
        self
    }

    pub fn blank_line(self) -> Self {
        self.line("")
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// An appointment selected for the upcoming section
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingVisit<'a> {
    pub appointment: &'a Appointment,
    /// Running visit ordinal, `None` for a client's only visit
    pub visit_number: Option<usize>,
}

/// Appointments starting on or after `today`, earliest first
pub fn upcoming_visits<'a>(
    appointments: &'a [Appointment],
    ranks: &VisitRanks,
    today: NaiveDate,
) -> Vec<UpcomingVisit<'a>> {
    let mut upcoming: Vec<UpcomingVisit<'a>> = appointments
        .iter()
        .enumerate()
        .filter(|(_, appointment)| appointment.start_date() >= today)
        .map(|(index, appointment)| {
            let visit_number = if ranks.is_repeat_client(&appointment.client_identity()) {
                ranks.rank_at(index)
            } else {
                None
            };
            UpcomingVisit {
                appointment,
                visit_number,
            }
        })
        .collect();
    upcoming.sort_by_key(|visit| visit.appointment.start_time);
    upcoming
}

/// Number of appointments whose start date is `today`
pub fn appointments_on(appointments: &[Appointment], today: NaiveDate) -> usize {
    appointments
        .iter()
        .filter(|appointment| appointment.start_date() == today)
        .count()
}

#[derive(Debug, Clone)]
pub struct ReportRenderer {
    reason_field_id: i64,
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self {
            reason_field_id: DEFAULT_REASON_FIELD_ID,
        }
    }

    pub fn with_reason_field(reason_field_id: i64) -> Self {
        Self { reason_field_id }
    }

    /// Full report body: upcoming section, then one block per pay period
    pub fn render(
        &self,
        buffer: ReportBuffer,
        upcoming: &[UpcomingVisit<'_>],
        periods: &[PeriodIncome],
        keys: &[DurationRateKey],
    ) -> ReportBuffer {
        let buffer = self.render_upcoming(buffer, upcoming);
        self.render_income(buffer, periods, keys)
    }

    pub fn render_upcoming(&self, buffer: ReportBuffer, upcoming: &[UpcomingVisit<'_>]) -> ReportBuffer {
        let buffer = buffer.line("Upcoming Appointments:");
        if upcoming.is_empty() {
            return buffer.line("None");
        }
        upcoming
            .iter()
            .fold(buffer, |buffer, visit| buffer.line(self.format_visit(visit)))
    }

    pub fn render_income(
        &self,
        buffer: ReportBuffer,
        periods: &[PeriodIncome],
        keys: &[DurationRateKey],
    ) -> ReportBuffer {
        periods.iter().fold(buffer, |buffer, income| {
            let mut buffer = buffer
                .blank_line()
                .line(format!("Pay Period: {}", income.period));
            for key in keys {
                let count = income.result.count_for(key);
                if count > 0 {
                    buffer = buffer.line(format!(
                        "{}: {} at ${} each = ${}",
                        key.duration_label,
                        count,
                        format_rate(key.rate),
                        format_rate(income.result.extended_total(key))
                    ));
                }
            }
            buffer
                .line(format!("Total Income: ${}", format_total(income.result.total_income)))
                .line(format!("Total Appointments: {}", income.result.total_count))
        })
    }

    /// One upcoming-appointment line
    pub fn format_visit(&self, visit: &UpcomingVisit<'_>) -> String {
        let appointment = visit.appointment;
        let mut line = format!(
            "{} - {}: {} ({} min)",
            appointment.start_time.format("%A %B %-d %-I:%M %p"),
            appointment.end_time.format("%-I:%M %p"),
            appointment.display_name(),
            appointment.duration_minutes
        );
        if let Some(n) = visit.visit_number {
            line.push_str(&format!(", {} visit", ordinal(n)));
        }
        if let Some(reason) = appointment.intake_answer(self.reason_field_id) {
            line.push_str(", ");
            line.push_str(reason);
        }
        line
    }

    /// Report subject annotated with today's appointment count
    pub fn subject(&self, base: &str, todays_appointments: usize) -> String {
        let noun = if todays_appointments == 1 {
            "appointment"
        } else {
            "appointments"
        };
        format!("{} ({} {} today)", base, todays_appointments, noun)
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Short money form used for unit rates: "40.0", "42.5", "42.25"
pub fn format_rate(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{}.0", normalized)
    } else {
        normalized.to_string()
    }
}

/// Two-decimal money form used for totals: "120.00"
pub fn format_total(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::income_aggregator::AggregateResult;
    use crate::backend::domain::models::{IntakeAnswer, PayPeriod};
    use crate::backend::domain::visit_rank::VisitRankAssigner;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    const REASON: i64 = 77;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_appointment(first: &str, last: &str, start: &str, reason: Option<&str>) -> Appointment {
        let start = DateTime::parse_from_rfc3339(start).unwrap();
        let intake_answers = reason
            .map(|r| vec![IntakeAnswer { field_id: REASON, value: r.to_string() }])
            .unwrap_or_default();
        Appointment {
            client_first_name: first.to_string(),
            client_last_name: last.to_string(),
            start_time: start,
            end_time: start + chrono::Duration::minutes(30),
            duration_minutes: 30,
            intake_answers,
        }
    }

    #[test]
    fn test_report_buffer_accumulates_lines() {
        let buffer = ReportBuffer::new().line("a").blank_line().line(String::from("b"));
        assert_eq!(buffer.as_str(), "a\n\nb\n");
        assert_eq!(buffer.into_text(), "a\n\nb\n");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(dec!(40.00)), "40.0");
        assert_eq!(format_rate(dec!(40)), "40.0");
        assert_eq!(format_rate(dec!(42.50)), "42.5");
        assert_eq!(format_rate(dec!(42.25)), "42.25");
        assert_eq!(format_rate(dec!(120.000)), "120.0");
        assert_eq!(format_rate(Decimal::ZERO), "0.0");
    }

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(dec!(120)), "120.00");
        assert_eq!(format_total(dec!(82.5)), "82.50");
        assert_eq!(format_total(dec!(10.005)), "10.00");
        assert_eq!(format_total(dec!(0)), "0.00");
    }

    #[test]
    fn test_format_visit_line() {
        let renderer = ReportRenderer::with_reason_field(REASON);
        let appointment = create_test_appointment("jane", "DOE", "2021-01-05T14:00:00-05:00", Some("  Back pain "));
        let visit = UpcomingVisit {
            appointment: &appointment,
            visit_number: Some(2),
        };
        assert_eq!(
            renderer.format_visit(&visit),
            "Tuesday January 5 2:00 PM - 2:30 PM: Jane Doe (30 min), 2nd visit, Back pain"
        );
    }

    #[test]
    fn test_format_visit_without_rank_or_reason() {
        let renderer = ReportRenderer::with_reason_field(REASON);
        let blank = create_test_appointment("Sam", "Lee", "2021-01-05T09:05:00-05:00", Some("   "));
        let none = create_test_appointment("Sam", "Lee", "2021-01-05T09:05:00-05:00", None);
        for appointment in [&blank, &none] {
            let visit = UpcomingVisit { appointment, visit_number: None };
            assert_eq!(
                renderer.format_visit(&visit),
                "Tuesday January 5 9:05 AM - 9:35 AM: Sam Lee (30 min)"
            );
        }
    }

    #[test]
    fn test_upcoming_visits_filters_sorts_and_ranks() {
        let appointments = vec![
            create_test_appointment("Jane", "Doe", "2021-01-12T10:00:00-05:00", None),
            create_test_appointment("Jane", "Doe", "2021-01-01T10:00:00-05:00", None),
            create_test_appointment("Sam", "Lee", "2021-01-10T08:00:00-05:00", None),
            create_test_appointment("Ann", "Roe", "2021-01-09T08:00:00-05:00", None),
        ];
        let ranks = VisitRankAssigner::assign(&appointments);

        let upcoming = upcoming_visits(&appointments, &ranks, date(2021, 1, 10));

        let names: Vec<(String, Option<usize>)> = upcoming
            .iter()
            .map(|v| (v.appointment.display_name(), v.visit_number))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Sam Lee".to_string(), None),
                ("Jane Doe".to_string(), Some(2)),
            ]
        );
    }

    #[test]
    fn test_appointments_on_today() {
        let appointments = vec![
            create_test_appointment("Jane", "Doe", "2021-01-10T10:00:00-05:00", None),
            create_test_appointment("Sam", "Lee", "2021-01-10T23:00:00-05:00", None),
            create_test_appointment("Ann", "Roe", "2021-01-11T08:00:00-05:00", None),
        ];
        assert_eq!(appointments_on(&appointments, date(2021, 1, 10)), 2);
        assert_eq!(appointments_on(&appointments, date(2021, 1, 12)), 0);
    }

    #[test]
    fn test_subject() {
        let renderer = ReportRenderer::new();
        assert_eq!(renderer.subject("Payroll", 0), "Payroll (0 appointments today)");
        assert_eq!(renderer.subject("Payroll", 1), "Payroll (1 appointment today)");
        assert_eq!(renderer.subject("Payroll", 4), "Payroll (4 appointments today)");
    }

    #[test]
    fn test_render_income_lists_only_billed_keys() {
        let renderer = ReportRenderer::new();
        let keys = vec![
            DurationRateKey::new("30-minute", dec!(40)),
            DurationRateKey::new("30-minute", dec!(45)),
            DurationRateKey::new("60-minute", dec!(70)),
        ];
        let mut result = AggregateResult {
            total_income: dec!(150),
            total_count: 3,
            ..Default::default()
        };
        result.per_key_counts.insert(keys[0].clone(), 2);
        result.per_key_counts.insert(keys[2].clone(), 1);
        let periods = vec![PeriodIncome {
            period: PayPeriod::starting(date(2021, 1, 1)).unwrap(),
            result,
        }];

        let text = renderer
            .render_income(ReportBuffer::new(), &periods, &keys)
            .into_text();

        assert_eq!(
            text,
            "\nPay Period: 2021-01-01 to 2021-01-14\n\
             30-minute: 2 at $40.0 each = $80.0\n\
             60-minute: 1 at $70.0 each = $70.0\n\
             Total Income: $150.00\n\
             Total Appointments: 3\n"
        );
    }

    #[test]
    fn test_render_empty_upcoming_section() {
        let renderer = ReportRenderer::new();
        let text = renderer.render(ReportBuffer::new(), &[], &[], &[]).into_text();
        assert_eq!(text, "Upcoming Appointments:\nNone\n");
    }
}
