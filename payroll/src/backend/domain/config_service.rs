use chrono::NaiveDate;
use log::{debug, info};
use reqwest::Url;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::backend::domain::models::PayScaleVersion;
use crate::backend::domain::rate_table::RateTable;
use crate::backend::domain::report_renderer::DEFAULT_REASON_FIELD_ID;
use crate::backend::error::{PayrollError, PayrollResult};
use crate::backend::io::email_service::EmailConfig;

/// Basic-auth credentials for the scheduling provider, passed through as-is
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleCredentials {
    pub user_id: String,
    pub api_key: String,
}

impl fmt::Debug for ScheduleCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleCredentials")
            .field("user_id", &self.user_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// On-disk shape of the configuration file
#[derive(Debug, Deserialize)]
struct PayrollConfigFile {
    schedule_endpoint: String,
    auth: ScheduleCredentials,
    pay_period_anchor_date: String,
    report_subject: String,
    #[serde(default)]
    report_recipients: Vec<String>,
    reason_field_id: Option<i64>,
    #[serde(default)]
    pay_scales: BTreeMap<String, BTreeMap<String, String>>,
    email: Option<EmailConfig>,
}

/// Validated configuration for one payroll run
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    pub schedule_endpoint: Url,
    pub credentials: ScheduleCredentials,
    pub pay_period_anchor_date: NaiveDate,
    pub report_subject: String,
    pub report_recipients: Vec<String>,
    pub reason_field_id: i64,
    pub rate_table: RateTable,
    /// When absent the report goes to standard output
    pub email: Option<EmailConfig>,
}

pub struct ConfigService;

impl ConfigService {
    pub fn load_config(config_path: &Path) -> PayrollResult<PayrollConfig> {
        info!("Loading payroll configuration from {:?}", config_path);
        let content = fs::read_to_string(config_path).map_err(|e| {
            PayrollError::ConfigMissingOrInvalid(format!(
                "failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;
        Self::parse_config(&content)
    }

    pub fn parse_config(content: &str) -> PayrollResult<PayrollConfig> {
        let file: PayrollConfigFile = toml::from_str(content)
            .map_err(|e| invalid(format!("failed to parse config TOML: {}", e)))?;

        let schedule_endpoint = Url::parse(file.schedule_endpoint.trim())
            .map_err(|e| invalid(format!("schedule_endpoint is not a valid URL: {}", e)))?;
        if !matches!(schedule_endpoint.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "schedule_endpoint must be http or https, got {}",
                schedule_endpoint.scheme()
            )));
        }

        if file.auth.user_id.is_empty() {
            return Err(invalid("auth.user_id is required"));
        }
        if file.auth.api_key.is_empty() {
            return Err(invalid("auth.api_key is required"));
        }

        let pay_period_anchor_date = parse_date(&file.pay_period_anchor_date)
            .map_err(|e| invalid(format!("pay_period_anchor_date: {}", e)))?;

        let report_subject = file.report_subject.trim().to_string();
        if report_subject.is_empty() {
            return Err(invalid("report_subject is required"));
        }

        let rate_table = parse_pay_scales(&file.pay_scales)?;

        if let Some(email) = &file.email {
            email.validate()?;
            if file.report_recipients.is_empty() {
                return Err(invalid(
                    "report_recipients must list at least one address when [email] is configured",
                ));
            }
        }

        let config = PayrollConfig {
            schedule_endpoint,
            credentials: file.auth,
            pay_period_anchor_date,
            report_subject,
            report_recipients: file.report_recipients,
            reason_field_id: file.reason_field_id.unwrap_or(DEFAULT_REASON_FIELD_ID),
            rate_table,
            email: file.email,
        };

        info!(
            "Loaded {} pay scale versions, anchor date {}, delivery by {}",
            config.rate_table.versions().len(),
            config.pay_period_anchor_date,
            if config.email.is_some() { "email" } else { "console" }
        );
        Ok(config)
    }
}

fn invalid(message: impl Into<String>) -> PayrollError {
    PayrollError::ConfigMissingOrInvalid(message.into())
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
}

fn parse_pay_scales(
    pay_scales: &BTreeMap<String, BTreeMap<String, String>>,
) -> PayrollResult<RateTable> {
    if pay_scales.is_empty() {
        return Err(invalid("at least one pay scale version is required"));
    }

    let mut versions = Vec::with_capacity(pay_scales.len());
    for (effective, rates) in pay_scales {
        let effective_date = parse_date(effective)
            .map_err(|e| invalid(format!("pay scale date {:?}: {}", effective, e)))?;

        let mut parsed = BTreeMap::new();
        for (label, rate) in rates {
            let rate = Decimal::from_str(rate.trim()).map_err(|e| {
                invalid(format!(
                    "rate {:?} for {} in pay scale {}: {}",
                    rate, label, effective, e
                ))
            })?;
            parsed.insert(label.clone(), rate);
        }
        debug!("Pay scale effective {}: {} rates", effective_date, parsed.len());
        versions.push(PayScaleVersion::new(effective_date, parsed));
    }

    RateTable::new(versions)
}
