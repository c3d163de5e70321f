use super::ShiftStore;
use crate::{error::ShiftResult, model::StaffingRequirement};
use chrono::Weekday;
use rusqlite::params;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl ShiftStore {
    // ── Staffing requirement ──────────────────────────────────────

    /// Insert or overwrite the minimum for one weekday.
    pub fn set_staffing_requirement(&self, req: StaffingRequirement) -> ShiftResult<()> {
        self.conn.execute(
            "INSERT INTO staffing_requirement (weekday, min_staff) VALUES (?1, ?2)
             ON CONFLICT (weekday) DO UPDATE SET min_staff = excluded.min_staff",
            params![req.weekday.num_days_from_monday(), req.min_staff],
        )?;
        Ok(())
    }

    pub fn clear_staffing_requirement(&self, weekday: Weekday) -> ShiftResult<()> {
        self.conn.execute(
            "DELETE FROM staffing_requirement WHERE weekday = ?1",
            params![weekday.num_days_from_monday()],
        )?;
        Ok(())
    }

    /// Stored rows, Monday first.
    pub fn staffing_requirements(&self) -> ShiftResult<Vec<StaffingRequirement>> {
        let mut stmt = self.conn.prepare(
            "SELECT weekday, min_staff FROM staffing_requirement ORDER BY weekday",
        )?;
        let rows = stmt.query_map([], |row| {
            let idx: i64 = row.get(0)?;
            Ok(StaffingRequirement {
                weekday: WEEKDAYS[idx.rem_euclid(7) as usize],
                min_staff: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
