use super::{parse_column, ShiftStore};
use crate::{
    calendar::Month,
    error::ShiftResult,
    model::ShiftAssignment,
    ports::GenerationRun,
    types::RunId,
};
use rusqlite::params;
use serde::Serialize;

/// A stored `generation_run` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRunRow {
    pub run_id: RunId,
    pub year: i32,
    pub month: u32,
    pub seed: u64,
    pub assignments_written: usize,
    pub days_understaffed: usize,
    pub created_at: String,
}

impl ShiftStore {
    // ── Shift ─────────────────────────────────────────────────────

    /// Delete every shift in `month`, insert `assignments` and record
    /// the run, all in one transaction. Any failure rolls the whole
    /// thing back.
    pub fn replace_month_shifts(
        &mut self,
        month: Month,
        assignments: &[ShiftAssignment],
        run: &GenerationRun,
    ) -> ShiftResult<usize> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM shift WHERE date BETWEEN ?1 AND ?2",
            params![month.first_day(), month.last_day()],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO shift (employee_id, date, time_band) VALUES (?1, ?2, ?3)",
            )?;
            for a in assignments {
                stmt.execute(params![a.employee_id, a.date, a.time_band.label()])?;
            }
        }
        tx.execute(
            "INSERT INTO generation_run (
                run_id, year, month, seed, assignments_written, days_understaffed, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &run.run_id,
                month.year(),
                month.month(),
                run.seed as i64,
                run.assignments_written as i64,
                run.days_understaffed as i64,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;
        tx.commit()?;
        log::debug!("{month} store: replaced {removed} shifts with {}", assignments.len());
        Ok(assignments.len())
    }

    /// All shifts in `month`, ordered by date then employee.
    pub fn shifts_for_month(&self, month: Month) -> ShiftResult<Vec<ShiftAssignment>> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, date, time_band FROM shift
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY date ASC, employee_id ASC",
        )?;
        let rows = stmt.query_map(params![month.first_day(), month.last_day()], |row| {
            Ok(ShiftAssignment {
                employee_id: row.get(0)?,
                date: row.get(1)?,
                time_band: parse_column(row, 2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Generation run ────────────────────────────────────────────

    /// Runs recorded for `month`, oldest first.
    pub fn runs_for_month(&self, month: Month) -> ShiftResult<Vec<GenerationRunRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT run_id, year, month, seed, assignments_written, days_understaffed, created_at
             FROM generation_run WHERE year = ?1 AND month = ?2
             ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map(params![month.year(), month.month()], |row| {
            Ok(GenerationRunRow {
                run_id: row.get(0)?,
                year: row.get(1)?,
                month: row.get(2)?,
                seed: row.get::<_, i64>(3)? as u64,
                assignments_written: row.get::<_, i64>(4)? as usize,
                days_understaffed: row.get::<_, i64>(5)? as usize,
                created_at: row.get(6)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
