//! Staffing policy: how many people a date calls for.

use crate::{
    calendar::is_weekend,
    config::{ScheduleConfig, StaffingBand, StaffingSource},
    model::StaffingRequirement,
};
use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone)]
pub struct StaffingPolicy {
    weekday: StaffingBand,
    weekend: StaffingBand,
    source: StaffingSource,
    /// Indexed by days from Monday.
    requirements: [Option<u32>; 7],
}

impl StaffingPolicy {
    pub fn new(config: &ScheduleConfig, requirements: &[StaffingRequirement]) -> Self {
        let mut table = [None; 7];
        for req in requirements {
            table[req.weekday.num_days_from_monday() as usize] = Some(req.min_staff);
        }
        Self {
            weekday: config.weekday_band,
            weekend: config.weekend_band,
            source: config.staffing_source,
            requirements: table,
        }
    }

    /// The inclusive headcount band for `date`. Pure.
    pub fn band(&self, date: NaiveDate) -> StaffingBand {
        let base = if is_weekend(date) { self.weekend } else { self.weekday };
        match self.source {
            StaffingSource::FixedBands => base,
            StaffingSource::WeekdayRequirements => {
                match self.requirements[date.weekday().num_days_from_monday() as usize] {
                    Some(min) => StaffingBand { min, max: base.max.max(min) },
                    None => base,
                }
            }
        }
    }
}
