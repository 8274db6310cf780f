//! Appointment list retrieval from the scheduling provider.
//!
//! One authenticated GET per run. Anything other than `200 OK` fails the run;
//! there is no retry.

use chrono::NaiveDate;
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use shared::AppointmentRecord;
use std::time::Duration;

use crate::backend::domain::config_service::{PayrollConfig, ScheduleCredentials};
use crate::backend::domain::models::Appointment;
use crate::backend::error::{PayrollError, PayrollResult};
use crate::backend::io::mappers::AppointmentMapper;

/// Window of appointments to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleQuery {
    /// Earliest appointment date wanted; the first pay period starts here
    pub min_date: NaiveDate,
}

/// Source of the appointment list
pub trait ScheduleSource {
    fn fetch_appointments(&self, query: &ScheduleQuery) -> PayrollResult<Vec<Appointment>>;
}

/// Blocking HTTP client for the provider's appointment endpoint
pub struct HttpScheduleClient {
    client: Client,
    endpoint: Url,
    credentials: ScheduleCredentials,
}

impl HttpScheduleClient {
    pub fn new(endpoint: Url, credentials: ScheduleCredentials) -> PayrollResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                PayrollError::ScheduleFetchFailed(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    pub fn from_config(config: &PayrollConfig) -> PayrollResult<Self> {
        Self::new(config.schedule_endpoint.clone(), config.credentials.clone())
    }

    /// Endpoint with the query window appended to any configured parameters
    pub fn request_url(&self, query: &ScheduleQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("minDate", &query.min_date.format("%Y-%m-%d").to_string());
        url
    }

    fn fetch_records(&self, query: &ScheduleQuery) -> PayrollResult<Vec<AppointmentRecord>> {
        let url = self.request_url(query);
        debug!("Requesting appointments from {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.user_id, Some(&self.credentials.api_key))
            .send()
            .map_err(|e| PayrollError::ScheduleFetchFailed(format!("request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => response.json::<Vec<AppointmentRecord>>().map_err(|e| {
                PayrollError::ScheduleFetchFailed(format!("failed to parse response: {}", e))
            }),
            status => Err(PayrollError::ScheduleFetchFailed(format!(
                "provider answered {}",
                status
            ))),
        }
    }
}

impl ScheduleSource for HttpScheduleClient {
    fn fetch_appointments(&self, query: &ScheduleQuery) -> PayrollResult<Vec<Appointment>> {
        let records = self.fetch_records(query)?;
        info!("Fetched {} appointments since {}", records.len(), query.min_date);
        AppointmentMapper::to_domain_list(records)
    }
}
