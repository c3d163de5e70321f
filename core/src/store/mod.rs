//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! The generator reaches it through RosterSource and AssignmentSink;
//! reports and the runner call store methods. Nobody else runs SQL.

use crate::{
    calendar::Month,
    error::{ShiftError, ShiftResult},
    model::{Roster, ShiftAssignment, StaffingRequirement},
    ports::{AssignmentSink, GenerationRun, RosterSource},
};
use rusqlite::{types::Type, Connection, Row};
use std::str::FromStr;

mod employee;
mod shift;
mod staffing;

pub use shift::GenerationRunRow;

pub struct ShiftStore {
    conn: Connection,
}

impl ShiftStore {
    pub fn open(path: &str) -> ShiftResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ShiftResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ShiftResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }
}

impl RosterSource for ShiftStore {
    fn roster_for_month(&self, month: Month) -> ShiftResult<Roster> {
        let mut roster = Roster::new(self.list_employees()?);
        for (employee_id, date) in self.requested_off_for_month(month)? {
            roster.add_requested_off(employee_id, date);
        }
        Ok(roster)
    }

    fn staffing_requirements(&self) -> ShiftResult<Vec<StaffingRequirement>> {
        ShiftStore::staffing_requirements(self)
    }
}

impl AssignmentSink for ShiftStore {
    fn replace_month(
        &mut self,
        month: Month,
        assignments: &[ShiftAssignment],
        run: &GenerationRun,
    ) -> ShiftResult<usize> {
        self.replace_month_shifts(month, assignments, run)
    }
}

/// Read a text column through the type's `FromStr`.
fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = ShiftError>,
{
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e: ShiftError| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
