//! Availability resolver: may this employee work on this date?

use crate::streak::StreakState;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Eligible,
    RequestedOff,
    /// Working would push the streak past the configured limit.
    StreakLimit { projected: u32 },
}

impl Availability {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Availability::Eligible)
    }
}

/// Rules in order: requested off, then projected streak vs. the limit.
/// Reads the streak; never mutates it.
pub fn resolve(
    date: NaiveDate,
    requested_off: Option<&BTreeSet<NaiveDate>>,
    streak: &StreakState,
    max_consecutive: u32,
) -> Availability {
    if requested_off.is_some_and(|dates| dates.contains(&date)) {
        return Availability::RequestedOff;
    }
    let projected = streak.projected(date);
    if projected > max_consecutive {
        return Availability::StreakLimit { projected };
    }
    Availability::Eligible
}
