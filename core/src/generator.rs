//! The month generator: drives one generation run end to end.
//!
//! EXECUTION ORDER (fixed, never reordered):
//!   0. Validate year/month and config. Nothing is read or written on failure.
//!   1. Pull the roster snapshot once.
//!   2. For each date, earliest first:
//!        a. eligible pool   (availability)
//!        b. headcount band  (staffing)
//!        c. selection       (selector)
//!        d. record assignments
//!        e. commit streaks  (streak)
//!   3. Hand the whole month to the sink in one atomic replace.
//!
//! RULES:
//!   - Day d+1 sees the streak state committed by day d; days are never
//!     reordered or processed concurrently.
//!   - All randomness flows through the RngBank built from the run seed.
//!   - Understaffing is reported, never raised.

use crate::{
    availability::{self, Availability},
    calendar::Month,
    config::{ScheduleConfig, StaffingBand},
    error::ShiftResult,
    model::{Roster, ShiftAssignment, StaffingRequirement},
    ports::{AssignmentSink, GenerationRun, RosterSource},
    rng::{RngBank, SeedMode},
    selector::{self, SelectorRngs},
    staffing::StaffingPolicy,
    streak::StreakTracker,
    types::{EmployeeId, RunId},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// What happened on one date of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOutcome {
    pub date: NaiveDate,
    pub band: StaffingBand,
    pub eligible: usize,
    pub requested_off: usize,
    pub streak_blocked: usize,
    pub target: u32,
    pub assigned: usize,
    pub understaffed: bool,
}

/// A computed month that has not been written anywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPlan {
    pub month: Month,
    pub seed: u64,
    pub assignments: Vec<ShiftAssignment>,
    pub days: Vec<DayOutcome>,
}

impl MonthPlan {
    pub fn days_understaffed(&self) -> usize {
        self.days.iter().filter(|d| d.understaffed).count()
    }
}

/// Result of `generate_month`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub run_id: RunId,
    pub month: Month,
    pub seed: u64,
    pub assignments_written: usize,
    pub days_understaffed: usize,
    pub days: Vec<DayOutcome>,
}

pub struct ShiftGenerator<S> {
    pub config: ScheduleConfig,
    pub store: S,
}

impl<S> ShiftGenerator<S>
where
    S: RosterSource + AssignmentSink,
{
    pub fn new(config: ScheduleConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Regenerate `year`-`month` from scratch and replace whatever the
    /// store held for it. On any error the stored month is unchanged.
    pub fn generate_month(
        &mut self,
        year: i32,
        month: u32,
        seed: SeedMode,
    ) -> ShiftResult<GenerationReport> {
        let month = Month::new(year, month)?;
        self.config.validate()?;

        let roster = self.store.roster_for_month(month)?;
        let requirements = self.store.staffing_requirements()?;
        let seed = seed.resolve();

        let plan = plan_month(&self.config, &requirements, &roster, month, seed)?;

        let run = GenerationRun {
            run_id: uuid::Uuid::new_v4().to_string(),
            month,
            seed,
            assignments_written: plan.assignments.len(),
            days_understaffed: plan.days_understaffed(),
        };
        let written = self.store.replace_month(month, &plan.assignments, &run)?;

        log::info!(
            "{month} generator: run {} wrote {written} assignments for {} employees, \
             {} understaffed days (seed {seed})",
            run.run_id,
            roster.len(),
            run.days_understaffed,
        );

        Ok(GenerationReport {
            run_id: run.run_id,
            month,
            seed,
            assignments_written: written,
            days_understaffed: run.days_understaffed,
            days: plan.days,
        })
    }
}

/// Compute a month without touching storage. Deterministic in `seed`.
/// Fails with the config's validation error before drawing anything.
pub fn plan_month(
    config: &ScheduleConfig,
    requirements: &[StaffingRequirement],
    roster: &Roster,
    month: Month,
    seed: u64,
) -> ShiftResult<MonthPlan> {
    config.validate()?;
    if roster.is_empty() {
        log::warn!("{month} generator: roster is empty, every day will be understaffed");
    }

    let policy = StaffingPolicy::new(config, requirements);
    let bank = RngBank::new(seed);
    let mut rngs = SelectorRngs::from_bank(&bank);
    let mut streaks = StreakTracker::new(roster.employees().iter().map(|e| e.id));

    let mut assignments = Vec::new();
    let mut days = Vec::new();

    for date in month.days() {
        let mut pool: Vec<EmployeeId> = Vec::with_capacity(roster.len());
        let (mut requested_off, mut streak_blocked) = (0, 0);

        for employee in roster.employees() {
            match availability::resolve(
                date,
                roster.requested_off(employee.id),
                &streaks.state(employee.id),
                config.max_consecutive_days,
            ) {
                Availability::Eligible => pool.push(employee.id),
                Availability::RequestedOff => requested_off += 1,
                Availability::StreakLimit { .. } => streak_blocked += 1,
            }
        }

        let band = policy.band(date);
        let selection = selector::select(&pool, band, &mut rngs);
        let understaffed = selection.is_understaffed(band);

        let chosen: HashSet<EmployeeId> = selection.chosen.iter().map(|(id, _)| *id).collect();
        assignments.extend(selection.chosen.iter().map(|&(employee_id, time_band)| {
            ShiftAssignment {
                employee_id,
                date,
                time_band,
            }
        }));
        streaks.commit_day(date, &chosen);

        if understaffed {
            log::warn!(
                "{month} generator: {date} understaffed, {} assigned against minimum {} \
                 ({} eligible)",
                selection.headcount(),
                band.min,
                pool.len(),
            );
        } else {
            log::debug!(
                "{month} generator: {date} assigned {} of {} eligible (band {}..={})",
                selection.headcount(),
                pool.len(),
                band.min,
                band.max,
            );
        }

        days.push(DayOutcome {
            date,
            band,
            eligible: pool.len(),
            requested_off,
            streak_blocked,
            target: selection.target,
            assigned: selection.headcount(),
            understaffed,
        });
    }

    Ok(MonthPlan {
        month,
        seed,
        assignments,
        days,
    })
}
