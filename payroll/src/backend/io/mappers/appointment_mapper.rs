use chrono::{DateTime, Days, FixedOffset, NaiveTime, TimeZone};
use shared::AppointmentRecord;

use crate::backend::domain::models::{Appointment, IntakeAnswer};
use crate::backend::error::{PayrollError, PayrollResult};

/// Converts scheduling provider records into domain appointments
pub struct AppointmentMapper;

impl AppointmentMapper {
    pub fn to_domain(record: AppointmentRecord) -> PayrollResult<Appointment> {
        let duration_minutes = parse_duration(&record.duration)?;
        let start_time = parse_timestamp(&record.datetime).ok_or_else(|| {
            invalid(format!(
                "unrecognised start time {:?} for {} {}",
                record.datetime, record.first_name, record.last_name
            ))
        })?;
        let end_time = match record.end_time.as_deref().map(str::trim) {
            None | Some("") => start_time + chrono::Duration::minutes(i64::from(duration_minutes)),
            Some(end) => parse_end_time(end, start_time)
                .ok_or_else(|| invalid(format!("unrecognised end time {:?}", end)))?,
        };

        let intake_answers = record
            .intake_values()
            .map(|value| IntakeAnswer {
                field_id: value.field_id,
                value: value.value.clone(),
            })
            .collect();

        Ok(Appointment {
            client_first_name: record.first_name,
            client_last_name: record.last_name,
            start_time,
            end_time,
            duration_minutes,
            intake_answers,
        })
    }

    pub fn to_domain_list(records: Vec<AppointmentRecord>) -> PayrollResult<Vec<Appointment>> {
        records.into_iter().map(Self::to_domain).collect()
    }
}

fn invalid(message: String) -> PayrollError {
    PayrollError::InvalidAppointmentRecord(message)
}

fn parse_duration(duration: &str) -> PayrollResult<u32> {
    let trimmed = duration.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(format!("duration {:?} is not a number of minutes", duration)));
    }
    match trimmed.parse::<u32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(invalid(format!("duration {:?} must be a positive number of minutes", duration))),
    }
}

/// RFC 3339, or the provider's `2021-01-05T10:00:00-0500` form
fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

/// Full timestamp, or a clock time like "10:30am" on the start's day and offset
fn parse_end_time(value: &str, start: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    if let Some(end) = parse_timestamp(value) {
        return Some(end);
    }

    let upper = value.to_uppercase();
    let time = NaiveTime::parse_from_str(&upper, "%I:%M%p")
        .or_else(|_| NaiveTime::parse_from_str(&upper, "%I:%M %p"))
        .ok()?;

    let mut date = start.date_naive();
    if time < start.time() {
        // ends after midnight
        date = date.checked_add_days(Days::new(1))?;
    }
    start
        .offset()
        .from_local_datetime(&date.and_time(time))
        .single()
}
