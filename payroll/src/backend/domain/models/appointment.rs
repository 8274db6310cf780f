//! Domain model for a scheduled appointment.
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::fmt;

/// One answered intake-form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeAnswer {
    pub field_id: i64,
    pub value: String,
}

/// An appointment as fetched from the scheduling provider. Never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    pub client_first_name: String,
    pub client_last_name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub duration_minutes: u32,
    pub intake_answers: Vec<IntakeAnswer>,
}

/// Case-insensitive client identity used to group a client's visits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        let full = format!("{} {}", first_name.trim(), last_name.trim());
        Self(full.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Appointment {
    pub fn client_identity(&self) -> ClientIdentity {
        ClientIdentity::new(&self.client_first_name, &self.client_last_name)
    }

    /// Join key against the pay scales, e.g. "30-minute"
    pub fn duration_label(&self) -> String {
        duration_label(self.duration_minutes)
    }

    /// Calendar date of the start, in the appointment's own offset
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    /// First answer recorded for `field_id`, trimmed; `None` when absent or blank
    pub fn intake_answer(&self, field_id: i64) -> Option<&str> {
        self.intake_answers
            .iter()
            .find(|answer| answer.field_id == field_id)
            .map(|answer| answer.value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Client name in title case, e.g. "mary-jane o'neil" -> "Mary-Jane O'Neil"
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.client_first_name.trim(),
            self.client_last_name.trim()
        );
        title_case(full.trim())
    }
}

pub fn duration_label(minutes: u32) -> String {
    format!("{}-minute", minutes)
}

/// Upper-cases the first letter of every run of letters and lower-cases the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
