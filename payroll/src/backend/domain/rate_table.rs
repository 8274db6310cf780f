//! Effective-dated pay rate lookup.
//!
//! A `RateTable` holds every `PayScaleVersion` ever configured, newest first.
//! An appointment is priced with the latest version whose effective date is on
//! or before the appointment's date. A label the selected version does not
//! list is priced at zero rather than failing the run.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

use crate::backend::domain::models::{DurationRateKey, PayScaleVersion};
use crate::backend::error::{PayrollError, PayrollResult};

#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    /// Sorted by effective date, descending
    versions: Vec<PayScaleVersion>,
}

impl RateTable {
    /// Build a table from versions in any order.
    ///
    /// Fails when two versions share an effective date or a rate is negative.
    pub fn new(mut versions: Vec<PayScaleVersion>) -> PayrollResult<Self> {
        versions.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));

        if let Some(pair) = versions
            .windows(2)
            .find(|pair| pair[0].effective_date == pair[1].effective_date)
        {
            return Err(PayrollError::ConfigMissingOrInvalid(format!(
                "more than one pay scale effective {}",
                pair[0].effective_date
            )));
        }

        for version in &versions {
            if let Some((label, rate)) = version.rates.iter().find(|(_, rate)| **rate < Decimal::ZERO) {
                return Err(PayrollError::ConfigMissingOrInvalid(format!(
                    "negative rate {} for {} in pay scale effective {}",
                    rate, label, version.effective_date
                )));
            }
        }

        Ok(Self { versions })
    }

    pub fn versions(&self) -> &[PayScaleVersion] {
        &self.versions
    }

    /// Latest version effective on or before `date`
    pub fn version_for(&self, date: NaiveDate) -> Option<&PayScaleVersion> {
        self.versions.iter().find(|v| v.effective_date <= date)
    }

    pub fn resolve_rate(&self, date: NaiveDate, duration_label: &str) -> PayrollResult<Decimal> {
        let version = self
            .version_for(date)
            .ok_or(PayrollError::NoApplicableRateVersion { date })?;

        match version.rate_for(duration_label) {
            Some(rate) => Ok(rate),
            None => {
                debug!(
                    "No rate for {} in pay scale effective {}, pricing at 0",
                    duration_label, version.effective_date
                );
                Ok(Decimal::ZERO)
            }
        }
    }

    pub fn resolve_key(&self, date: NaiveDate, duration_label: &str) -> PayrollResult<DurationRateKey> {
        let rate = self.resolve_rate(date, duration_label)?;
        Ok(DurationRateKey::new(duration_label, rate))
    }

    /// Every (duration, rate) pair found in any version, deduplicated and
    /// sorted by numeric duration then rate
    pub fn distinct_keys(&self) -> Vec<DurationRateKey> {
        let keys: BTreeSet<DurationRateKey> = self
            .versions
            .iter()
            .flat_map(|version| {
                version
                    .rates
                    .iter()
                    .map(|(label, rate)| DurationRateKey::new(label.clone(), *rate))
            })
            .collect();
        keys.into_iter().collect()
    }
}
