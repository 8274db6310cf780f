//! Repeat-visit counting.
//!
//! Clients are grouped by `ClientIdentity`. Each appointment gets the running
//! ordinal of that visit in the client's history (first visit = 1), ordered by
//! start time. The report only prints the ordinal for clients seen more than
//! once.

use std::collections::HashMap;

use crate::backend::domain::models::{Appointment, ClientIdentity};

/// Number of appointments per client
pub fn counts_by_client(appointments: &[Appointment]) -> HashMap<ClientIdentity, usize> {
    let mut counts = HashMap::new();
    for appointment in appointments {
        *counts.entry(appointment.client_identity()).or_insert(0) += 1;
    }
    counts
}

/// Ranks for a fixed appointment slice, addressed by index into that slice
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitRanks {
    totals: HashMap<ClientIdentity, usize>,
    ranks: Vec<usize>,
}

impl VisitRanks {
    /// 1-based ordinal of `appointments[index]` within its client's history
    pub fn rank_at(&self, index: usize) -> Option<usize> {
        self.ranks.get(index).copied()
    }

    pub fn total_for(&self, identity: &ClientIdentity) -> usize {
        self.totals.get(identity).copied().unwrap_or(0)
    }

    pub fn is_repeat_client(&self, identity: &ClientIdentity) -> bool {
        self.total_for(identity) > 1
    }
}

pub struct VisitRankAssigner;

impl VisitRankAssigner {
    /// Ties on start time keep input order
    pub fn assign(appointments: &[Appointment]) -> VisitRanks {
        let mut order: Vec<usize> = (0..appointments.len()).collect();
        order.sort_by_key(|&i| appointments[i].start_time);

        let mut seen: HashMap<ClientIdentity, usize> = HashMap::new();
        let mut ranks = vec![0; appointments.len()];
        for i in order {
            let count = seen.entry(appointments[i].client_identity()).or_insert(0);
            *count += 1;
            ranks[i] = *count;
        }

        VisitRanks {
            totals: seen,
            ranks,
        }
    }
}

/// English ordinal of `n`: "1st", "2nd", "3rd", "4th", ...
///
/// Only the last digit is considered, so 11, 12 and 13 render as "11st",
/// "12nd" and "13rd". Reports produced before this tool used the same rule.
pub fn ordinal(n: usize) -> String {
    let suffix = match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
