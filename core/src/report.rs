//! Month views over stored shifts: the employee × day matrix,
//! per-day attendance and per-employee salary totals.

use crate::{
    calendar::{is_weekend, weekday_name, Month},
    error::ShiftResult,
    model::{Employee, Role, ShiftAssignment, TimeBand},
    store::ShiftStore,
    types::EmployeeId,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHeader {
    pub date: NaiveDate,
    pub weekday_name: &'static str,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    pub date: NaiveDate,
    pub is_weekend: bool,
    /// `None` is a day off.
    pub time_band: Option<TimeBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub employee_id: EmployeeId,
    pub name: String,
    pub role: Role,
    pub hourly_rate: Option<u32>,
    pub cells: Vec<MatrixCell>,
    pub work_hours: f64,
}

impl MatrixRow {
    pub fn days_worked(&self) -> usize {
        self.cells.iter().filter(|c| c.time_band.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftMatrix {
    pub month: Month,
    pub days: Vec<DayHeader>,
    pub rows: Vec<MatrixRow>,
    /// Headcount per date, one entry for every day of the month.
    pub attendance: Vec<(NaiveDate, usize)>,
}

impl ShiftMatrix {
    /// `employees` should already be in display order; rows follow it.
    /// Shifts of employees not in the list are ignored.
    pub fn build(month: Month, employees: &[Employee], shifts: &[ShiftAssignment]) -> Self {
        let dates = month.days();
        let by_key: HashMap<(EmployeeId, NaiveDate), TimeBand> = shifts
            .iter()
            .filter(|s| month.contains(s.date))
            .map(|s| ((s.employee_id, s.date), s.time_band))
            .collect();

        let rows: Vec<MatrixRow> = employees
            .iter()
            .map(|e| {
                let cells: Vec<MatrixCell> = dates
                    .iter()
                    .map(|&date| MatrixCell {
                        date,
                        is_weekend: is_weekend(date),
                        time_band: by_key.get(&(e.id, date)).copied(),
                    })
                    .collect();
                let work_hours = cells.iter().filter_map(|c| c.time_band).map(|b| b.hours()).sum();
                MatrixRow {
                    employee_id: e.id,
                    name: e.name.clone(),
                    role: e.role,
                    hourly_rate: e.hourly_rate,
                    cells,
                    work_hours,
                }
            })
            .collect();

        let attendance = dates
            .iter()
            .enumerate()
            .map(|(i, &date)| {
                let count = rows.iter().filter(|r| r.cells[i].time_band.is_some()).count();
                (date, count)
            })
            .collect();

        let days = dates
            .into_iter()
            .map(|date| DayHeader {
                date,
                weekday_name: weekday_name(date),
                is_weekend: is_weekend(date),
            })
            .collect();

        Self {
            month,
            days,
            rows,
            attendance,
        }
    }

    pub fn load(store: &ShiftStore, month: Month) -> ShiftResult<Self> {
        let employees = store.list_employees()?;
        let shifts = store.shifts_for_month(month)?;
        Ok(Self::build(month, &employees, &shifts))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryLine {
    pub employee_id: EmployeeId,
    pub name: String,
    pub hours: f64,
    pub hourly_rate: Option<u32>,
    /// Yen, rounded to the nearest whole yen. A missing rate pays 0.
    pub amount: u64,
}

pub fn salary_summary(matrix: &ShiftMatrix) -> Vec<SalaryLine> {
    matrix
        .rows
        .iter()
        .map(|r| SalaryLine {
            employee_id: r.employee_id,
            name: r.name.clone(),
            hours: r.work_hours,
            hourly_rate: r.hourly_rate,
            amount: (r.work_hours * f64::from(r.hourly_rate.unwrap_or(0))).round() as u64,
        })
        .collect()
}
