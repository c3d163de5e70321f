//! Shared primitive types used across the scheduler.

/// Stable identifier of an employee row.
pub type EmployeeId = i64;

/// The canonical generation run identifier.
pub type RunId = String;
