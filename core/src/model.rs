//! Roster and shift records shared by the generator, the store and reports.

use crate::{
    error::ShiftError,
    types::EmployeeId,
};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    str::FromStr,
};

// ── Role ───────────────────────────────────────────────────────────

/// Employment category. Variant order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Staff,
    Part,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Manager, Role::Staff, Role::Part];

    /// Sort priority in rosters and exports; lower sorts first.
    pub fn display_order(&self) -> u8 {
        match self {
            Role::Manager => 1,
            Role::Staff => 2,
            Role::Part => 3,
        }
    }

    /// Stable key used in the database and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::Part => "part",
        }
    }

    /// Label printed in the shift matrix and CSV export.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Manager => "正社員",
            Role::Staff => "準社",
            Role::Part => "アルバイト",
        }
    }
}

impl FromStr for Role {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ShiftError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Time band ──────────────────────────────────────────────────────

/// One of the three fixed shift windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBand {
    Early,  // 9:00-17:00
    Middle, // 11:00-19:00
    Late,   // 13:00-21:00
}

impl TimeBand {
    pub const ALL: [TimeBand; 3] = [TimeBand::Early, TimeBand::Middle, TimeBand::Late];

    /// Clock hour the shift starts.
    pub fn start_hour(&self) -> u32 {
        match self {
            TimeBand::Early => 9,
            TimeBand::Middle => 11,
            TimeBand::Late => 13,
        }
    }

    /// Clock hour the shift ends.
    pub fn end_hour(&self) -> u32 {
        match self {
            TimeBand::Early => 17,
            TimeBand::Middle => 19,
            TimeBand::Late => 21,
        }
    }

    /// Length of the shift in hours.
    pub fn hours(&self) -> f64 {
        f64::from(self.end_hour() - self.start_hour())
    }

    /// Stored and exported form, e.g. `9:00-17:00`.
    pub fn label(&self) -> &'static str {
        match self {
            TimeBand::Early => "9:00-17:00",
            TimeBand::Middle => "11:00-19:00",
            TimeBand::Late => "13:00-21:00",
        }
    }
}

impl FromStr for TimeBand {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeBand::ALL
            .into_iter()
            .find(|b| b.label() == s)
            .ok_or_else(|| ShiftError::UnknownTimeBand(s.to_string()))
    }
}

impl fmt::Display for TimeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Employee ───────────────────────────────────────────────────────

pub const DEFAULT_MAX_DAYS: u32 = 22;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: Role,
    /// Yen per hour; `None` until an administrator sets it.
    pub hourly_rate: Option<u32>,
    /// Monthly working-day ceiling. Recorded, not enforced by the generator.
    pub max_days: u32,
}

impl Employee {
    pub fn new(id: EmployeeId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            hourly_rate: None,
            max_days: DEFAULT_MAX_DAYS,
        }
    }
}

/// Draft of an employee before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub role: Role,
    pub hourly_rate: Option<u32>,
    pub max_days: u32,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            hourly_rate: None,
            max_days: DEFAULT_MAX_DAYS,
        }
    }
}

/// Sort employees into display order: role priority, then id.
pub fn sort_for_display(employees: &mut [Employee]) {
    employees.sort_by_key(|e| (e.role.display_order(), e.id));
}

// ── Shift assignment ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub time_band: TimeBand,
}

// ── Staffing requirement ───────────────────────────────────────────

/// Per-weekday minimum headcount. Only consulted when the configured
/// staffing source is `weekday_requirements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRequirement {
    pub weekday: Weekday,
    pub min_staff: u32,
}

// ── Roster ─────────────────────────────────────────────────────────

/// Read-only snapshot of who can be scheduled in a month.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Employee>,
    requested_off: HashMap<EmployeeId, BTreeSet<NaiveDate>>,
}

impl Roster {
    /// Employees are kept in display order regardless of input order.
    pub fn new(mut employees: Vec<Employee>) -> Self {
        sort_for_display(&mut employees);
        Self {
            employees,
            requested_off: HashMap::new(),
        }
    }

    pub fn with_requested_off(mut self, employee_id: EmployeeId, date: NaiveDate) -> Self {
        self.add_requested_off(employee_id, date);
        self
    }

    pub fn add_requested_off(&mut self, employee_id: EmployeeId, date: NaiveDate) {
        self.requested_off.entry(employee_id).or_default().insert(date);
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn requested_off(&self, employee_id: EmployeeId) -> Option<&BTreeSet<NaiveDate>> {
        self.requested_off.get(&employee_id)
    }

    pub fn is_requested_off(&self, employee_id: EmployeeId, date: NaiveDate) -> bool {
        self.requested_off
            .get(&employee_id)
            .is_some_and(|dates| dates.contains(&date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_sort_by_display_order() {
        let mut staff = vec![
            Employee::new(1, "Aoki", Role::Part),
            Employee::new(2, "Baba", Role::Manager),
            Employee::new(3, "Chiba", Role::Staff),
            Employee::new(4, "Doi", Role::Manager),
        ];
        sort_for_display(&mut staff);
        let ids: Vec<_> = staff.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn every_band_is_eight_hours() {
        for band in TimeBand::ALL {
            assert_eq!(band.hours(), 8.0);
        }
    }

    #[test]
    fn labels_parse_back() {
        assert_eq!("11:00-19:00".parse::<TimeBand>().unwrap(), TimeBand::Middle);
        assert_eq!("part".parse::<Role>().unwrap(), Role::Part);
        assert!(matches!(
            "night".parse::<TimeBand>(),
            Err(ShiftError::UnknownTimeBand(_))
        ));
        assert!(matches!("owner".parse::<Role>(), Err(ShiftError::UnknownRole(_))));
    }

    #[test]
    fn requested_off_lookup() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 4).unwrap();
        let roster = Roster::new(vec![Employee::new(1, "Aoki", Role::Staff)])
            .with_requested_off(1, date);
        assert!(roster.is_requested_off(1, date));
        assert!(!roster.is_requested_off(1, date.succ_opt().unwrap()));
        assert!(!roster.is_requested_off(2, date));
    }
}
