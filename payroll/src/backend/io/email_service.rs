use lettre::message::Mailbox;
use lettre::{
    transport::smtp::authentication::Credentials,
    transport::smtp::client::{Tls, TlsParameters},
    Message, SmtpTransport, Transport,
};
use log::info;
use serde::Deserialize;
use std::fmt;

use crate::backend::domain::payroll_service::PayrollReport;
use crate::backend::error::{PayrollError, PayrollResult};
use crate::backend::io::delivery::ReportSink;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    /// TLS from the first byte (SMTPS); `false` upgrades with STARTTLS
    #[serde(default = "default_implicit_tls")]
    pub implicit_tls: bool,
}

fn default_implicit_tls() -> bool {
    true
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_email", &self.from_email)
            .field("implicit_tls", &self.implicit_tls)
            .finish()
    }
}

impl EmailConfig {
    pub fn validate(&self) -> PayrollResult<()> {
        let missing = |field: &str| {
            PayrollError::ConfigMissingOrInvalid(format!("email.{} is required", field))
        };
        if self.smtp_server.is_empty() {
            return Err(missing("smtp_server"));
        }
        if self.username.is_empty() {
            return Err(missing("username"));
        }
        if self.password.is_empty() {
            return Err(missing("password"));
        }
        if self.from_email.is_empty() {
            return Err(missing("from_email"));
        }
        self.from_email.parse::<Mailbox>().map_err(|e| {
            PayrollError::ConfigMissingOrInvalid(format!("email.from_email: {}", e))
        })?;
        Ok(())
    }
}

/// Sends the finished report as one plain-text message
pub struct EmailService {
    config: EmailConfig,
    recipients: Vec<Mailbox>,
    transport: SmtpTransport,
}

impl EmailService {
    pub fn new(config: EmailConfig, recipients: &[String]) -> PayrollResult<Self> {
        config.validate()?;
        let recipients = parse_recipients(recipients)?;

        info!(
            "Initializing email delivery via {}:{}",
            config.smtp_server, config.smtp_port
        );

        let tls_params = TlsParameters::new(config.smtp_server.clone()).map_err(|e| {
            PayrollError::ConfigMissingOrInvalid(format!("failed to create TLS parameters: {}", e))
        })?;
        let tls = if config.implicit_tls {
            Tls::Wrapper(tls_params)
        } else {
            Tls::Required(tls_params)
        };

        let transport = SmtpTransport::relay(&config.smtp_server)
            .map_err(|e| {
                PayrollError::ConfigMissingOrInvalid(format!("failed to create SMTP relay: {}", e))
            })?
            .port(config.smtp_port)
            .tls(tls)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            config,
            recipients,
            transport,
        })
    }

    /// Build the message without sending it
    pub fn compose(&self, report: &PayrollReport) -> PayrollResult<Message> {
        let from = self
            .config
            .from_email
            .parse::<Mailbox>()
            .map_err(|e| PayrollError::DeliveryFailed(format!("invalid from address: {}", e)))?;

        let builder = self
            .recipients
            .iter()
            .cloned()
            .fold(Message::builder().from(from), |builder, to| builder.to(to));

        builder
            .subject(report.subject.clone())
            .body(report.body.clone())
            .map_err(|e| PayrollError::DeliveryFailed(format!("failed to build email: {}", e)))
    }
}

impl ReportSink for EmailService {
    fn deliver(&self, report: &PayrollReport) -> PayrollResult<()> {
        let email = self.compose(report)?;
        self.transport
            .send(&email)
            .map_err(|e| PayrollError::DeliveryFailed(format!("failed to send email: {}", e)))?;
        info!(
            "Payroll report emailed to {} recipients",
            self.recipients.len()
        );
        Ok(())
    }
}

fn parse_recipients(recipients: &[String]) -> PayrollResult<Vec<Mailbox>> {
    if recipients.is_empty() {
        return Err(PayrollError::ConfigMissingOrInvalid(
            "at least one report recipient is required".to_string(),
        ));
    }
    recipients
        .iter()
        .map(|r| {
            r.parse::<Mailbox>().map_err(|e| {
                PayrollError::ConfigMissingOrInvalid(format!("recipient {:?}: {}", r, e))
            })
        })
        .collect()
}
