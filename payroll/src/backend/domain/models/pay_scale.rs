//! Domain models for pay scales.
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Rates per duration label, effective from `effective_date` until superseded
#[derive(Debug, Clone, PartialEq)]
pub struct PayScaleVersion {
    pub effective_date: NaiveDate,
    pub rates: BTreeMap<String, Decimal>,
}

impl PayScaleVersion {
    pub fn new(effective_date: NaiveDate, rates: BTreeMap<String, Decimal>) -> Self {
        Self {
            effective_date,
            rates,
        }
    }

    pub fn rate_for(&self, duration_label: &str) -> Option<Decimal> {
        self.rates.get(duration_label).copied()
    }
}

/// Aggregation key: the same duration can carry different historical rates
/// within one pay period when a new version takes effect mid-period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DurationRateKey {
    pub duration_label: String,
    pub rate: Decimal,
}

impl DurationRateKey {
    pub fn new(duration_label: impl Into<String>, rate: Decimal) -> Self {
        Self {
            duration_label: duration_label.into(),
            rate,
        }
    }

    /// Leading number of the label ("30-minute" -> 30), if any
    pub fn minutes(&self) -> Option<u32> {
        let digits: String = self
            .duration_label
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

impl Ord for DurationRateKey {
    /// Numeric duration ascending, then rate ascending. Labels without a
    /// leading number sort after all numeric ones.
    fn cmp(&self, other: &Self) -> Ordering {
        let by_minutes = match (self.minutes(), other.minutes()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_minutes
            .then_with(|| self.rate.cmp(&other.rate))
            .then_with(|| self.duration_label.cmp(&other.duration_label))
    }
}

impl PartialOrd for DurationRateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minutes_from_label() {
        assert_eq!(DurationRateKey::new("30-minute", dec!(40)).minutes(), Some(30));
        assert_eq!(DurationRateKey::new("120-minute", dec!(90)).minutes(), Some(120));
        assert_eq!(DurationRateKey::new("consult", dec!(10)).minutes(), None);
    }

    #[test]
    fn test_key_ordering_is_numeric_then_rate() {
        let mut keys = vec![
            DurationRateKey::new("90-minute", dec!(100)),
            DurationRateKey::new("consult", dec!(5)),
            DurationRateKey::new("30-minute", dec!(45)),
            DurationRateKey::new("120-minute", dec!(130)),
            DurationRateKey::new("30-minute", dec!(40.00)),
        ];
        keys.sort();

        let labels: Vec<(&str, Decimal)> = keys
            .iter()
            .map(|k| (k.duration_label.as_str(), k.rate))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("30-minute", dec!(40)),
                ("30-minute", dec!(45)),
                ("90-minute", dec!(100)),
                ("120-minute", dec!(130)),
                ("consult", dec!(5)),
            ]
        );
    }

    #[test]
    fn test_rate_for_unknown_label() {
        let mut rates = BTreeMap::new();
        rates.insert("30-minute".to_string(), dec!(40));
        let version = PayScaleVersion::new(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), rates);
        assert_eq!(version.rate_for("30-minute"), Some(dec!(40)));
        assert_eq!(version.rate_for("45-minute"), None);
    }
}
