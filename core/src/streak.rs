//! Streak tracker: per-employee consecutive-day state for one run.
//!
//! Owned by the generator for the lifetime of one generate call.
//! Never shared across calls, never persisted.

use crate::{calendar::previous_day, types::EmployeeId};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakState {
    pub last_worked: Option<NaiveDate>,
    pub consecutive: u32,
}

impl StreakState {
    fn worked_day_before(&self, date: NaiveDate) -> bool {
        self.last_worked.is_some() && self.last_worked == previous_day(date)
    }

    /// The streak length if this employee also works on `date`.
    pub fn projected(&self, date: NaiveDate) -> u32 {
        if self.worked_day_before(date) {
            self.consecutive + 1
        } else {
            1
        }
    }
}

#[derive(Debug, Default)]
pub struct StreakTracker {
    states: HashMap<EmployeeId, StreakState>,
}

impl StreakTracker {
    /// Everyone starts with no last-worked date and a zero count.
    pub fn new(employees: impl IntoIterator<Item = EmployeeId>) -> Self {
        Self {
            states: employees
                .into_iter()
                .map(|id| (id, StreakState::default()))
                .collect(),
        }
    }

    pub fn state(&self, employee_id: EmployeeId) -> StreakState {
        self.states.get(&employee_id).copied().unwrap_or_default()
    }

    /// Apply one day's final selection.
    ///
    /// Chosen employees extend or restart their streak. An employee who
    /// worked yesterday but not today has the count zeroed while
    /// `last_worked` keeps yesterday's date.
    pub fn commit_day(&mut self, date: NaiveDate, chosen: &HashSet<EmployeeId>) {
        for (id, state) in self.states.iter_mut() {
            if chosen.contains(id) {
                state.consecutive = state.projected(date);
                state.last_worked = Some(date);
            } else if state.worked_day_before(date) {
                state.consecutive = 0;
            }
        }
        for id in chosen {
            self.states.entry(*id).or_insert(StreakState {
                last_worked: Some(date),
                consecutive: 1,
            });
        }
    }
}
