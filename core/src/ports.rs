//! Collaborator traits at the edges of the generator.
//!
//! RULE: The generator reads the roster once per run through
//! RosterSource and writes the finished month once through
//! AssignmentSink. It never talks to storage any other way.

use crate::{
    calendar::Month,
    error::ShiftResult,
    model::{Roster, ShiftAssignment, StaffingRequirement},
    types::RunId,
};
use serde::Serialize;

/// Audit record written alongside the month's assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRun {
    pub run_id: RunId,
    pub month: Month,
    pub seed: u64,
    pub assignments_written: usize,
    pub days_understaffed: usize,
}

/// Supplies the read-only roster snapshot for a month.
pub trait RosterSource {
    /// Employees in display order with their requested-off dates
    /// for `month`.
    fn roster_for_month(&self, month: Month) -> ShiftResult<Roster>;

    /// The stored per-weekday minimum table. Empty when none is kept.
    fn staffing_requirements(&self) -> ShiftResult<Vec<StaffingRequirement>> {
        Ok(Vec::new())
    }
}

/// Receives the full replacement set for a month.
pub trait AssignmentSink {
    /// Replace every assignment in `month` with `assignments` and record
    /// `run`. Must be all-or-nothing: on error the previous month stays
    /// exactly as it was. Returns the number of rows written.
    fn replace_month(
        &mut self,
        month: Month,
        assignments: &[ShiftAssignment],
        run: &GenerationRun,
    ) -> ShiftResult<usize>;
}

impl RosterSource for Roster {
    fn roster_for_month(&self, _month: Month) -> ShiftResult<Roster> {
        Ok(self.clone())
    }
}
