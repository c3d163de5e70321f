use thiserror::Error;

use crate::types::EmployeeId;

#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid date range: {year}-{month:02} is not a calendar month")]
    InvalidDateRange { year: i32, month: u32 },

    #[error("Invalid staffing band: min {min} exceeds max {max}")]
    InvalidStaffingBand { min: u32, max: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Employee {id} not found")]
    EmployeeNotFound { id: EmployeeId },

    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    #[error("Unknown time band '{0}'")]
    UnknownTimeBand(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ShiftResult<T> = Result<T, ShiftError>;
