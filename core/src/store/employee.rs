use super::{parse_column, ShiftStore};
use crate::{
    calendar::Month,
    error::{ShiftError, ShiftResult},
    model::{sort_for_display, Employee, NewEmployee},
    types::EmployeeId,
};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        role: parse_column(row, 2)?,
        hourly_rate: row.get(3)?,
        max_days: row.get(4)?,
    })
}

impl ShiftStore {
    // ── Employee ──────────────────────────────────────────────────

    pub fn insert_employee(&self, e: &NewEmployee) -> ShiftResult<Employee> {
        self.conn.execute(
            "INSERT INTO employee (name, role, hourly_rate, max_days)
             VALUES (?1, ?2, ?3, ?4)",
            params![&e.name, e.role.as_str(), e.hourly_rate, e.max_days],
        )?;
        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            name: e.name.clone(),
            role: e.role,
            hourly_rate: e.hourly_rate,
            max_days: e.max_days,
        })
    }

    pub fn update_employee(&self, e: &Employee) -> ShiftResult<()> {
        let changed = self.conn.execute(
            "UPDATE employee SET name = ?1, role = ?2, hourly_rate = ?3, max_days = ?4
             WHERE employee_id = ?5",
            params![&e.name, e.role.as_str(), e.hourly_rate, e.max_days, e.id],
        )?;
        if changed == 0 {
            return Err(ShiftError::EmployeeNotFound { id: e.id });
        }
        Ok(())
    }

    pub fn set_hourly_rate(&self, id: EmployeeId, rate: Option<u32>) -> ShiftResult<()> {
        let changed = self.conn.execute(
            "UPDATE employee SET hourly_rate = ?1 WHERE employee_id = ?2",
            params![rate, id],
        )?;
        if changed == 0 {
            return Err(ShiftError::EmployeeNotFound { id });
        }
        Ok(())
    }

    /// Removes the employee with their requested-off dates and shifts.
    pub fn delete_employee(&self, id: EmployeeId) -> ShiftResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employee WHERE employee_id = ?1", params![id])?;
        if changed == 0 {
            return Err(ShiftError::EmployeeNotFound { id });
        }
        Ok(())
    }

    pub fn get_employee(&self, id: EmployeeId) -> ShiftResult<Option<Employee>> {
        self.conn
            .query_row(
                "SELECT employee_id, name, role, hourly_rate, max_days
                 FROM employee WHERE employee_id = ?1",
                params![id],
                employee_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All employees in display order (role priority, then id).
    pub fn list_employees(&self) -> ShiftResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, name, role, hourly_rate, max_days
             FROM employee ORDER BY employee_id ASC",
        )?;
        let mut employees = stmt
            .query_map([], employee_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        sort_for_display(&mut employees);
        Ok(employees)
    }

    pub fn employee_count(&self) -> ShiftResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM employee", [], |row| row.get(0))?;
        Ok(count)
    }

    // ── Requested off ─────────────────────────────────────────────

    /// Idempotent: adding the same date twice keeps one row.
    pub fn add_requested_off(&self, id: EmployeeId, date: NaiveDate) -> ShiftResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO requested_off (employee_id, date) VALUES (?1, ?2)",
            params![id, date],
        )?;
        Ok(())
    }

    pub fn remove_requested_off(&self, id: EmployeeId, date: NaiveDate) -> ShiftResult<()> {
        self.conn.execute(
            "DELETE FROM requested_off WHERE employee_id = ?1 AND date = ?2",
            params![id, date],
        )?;
        Ok(())
    }

    pub fn requested_off_for_month(&self, month: Month) -> ShiftResult<Vec<(EmployeeId, NaiveDate)>> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, date FROM requested_off
             WHERE date BETWEEN ?1 AND ?2
             ORDER BY employee_id, date",
        )?;
        let rows = stmt.query_map(params![month.first_day(), month.last_day()], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
