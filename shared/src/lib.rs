use serde::{Deserialize, Serialize};

/// Appointment as returned by the scheduling provider's appointment list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRecord {
    pub first_name: String,
    pub last_name: String,
    /// Start timestamp with offset, e.g. "2021-01-05T10:00:00-0500"
    pub datetime: String,
    /// End of the appointment, either a full timestamp or a clock time like "10:30am"
    #[serde(default)]
    pub end_time: Option<String>,
    /// Length in minutes, sent by the provider as a string of digits
    pub duration: String,
    /// Intake forms filled in by the client (may be empty)
    #[serde(default)]
    pub forms: Vec<IntakeForm>,
}

/// One intake form attached to an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeForm {
    #[serde(default)]
    pub values: Vec<IntakeFormValue>,
}

/// A single answered field of an intake form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeFormValue {
    #[serde(rename = "fieldID")]
    pub field_id: i64,
    #[serde(default)]
    pub value: String,
}

impl AppointmentRecord {
    /// All answered intake fields across every form, in the order received
    pub fn intake_values(&self) -> impl Iterator<Item = &IntakeFormValue> {
        self.forms.iter().flat_map(|form| form.values.iter())
    }
}
