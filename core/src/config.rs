//! Scheduler configuration: the single surface for staffing bands,
//! the consecutive-day limit and which staffing source is authoritative.

use crate::error::{ShiftError, ShiftResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Inclusive (min, max) headcount target for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingBand {
    pub min: u32,
    pub max: u32,
}

impl StaffingBand {
    pub fn new(min: u32, max: u32) -> ShiftResult<Self> {
        let band = Self { min, max };
        band.validate()?;
        Ok(band)
    }

    pub fn validate(&self) -> ShiftResult<()> {
        if self.min > self.max {
            return Err(ShiftError::InvalidStaffingBand {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Which input decides the daily minimum.
///
/// `FixedBands` is the default and reproduces the observed behaviour: the
/// per-weekday requirement table is stored but ignored. `WeekdayRequirements`
/// lets a stored requirement override the band minimum for its weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingSource {
    #[default]
    FixedBands,
    WeekdayRequirements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub weekday_band: StaffingBand,
    pub weekend_band: StaffingBand,
    pub max_consecutive_days: u32,
    pub staffing_source: StaffingSource,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekday_band: StaffingBand { min: 6, max: 10 },
            weekend_band: StaffingBand { min: 8, max: 12 },
            max_consecutive_days: 5,
            staffing_source: StaffingSource::FixedBands,
        }
    }
}

impl ScheduleConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        let config = Self::from_json(&content)?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> ShiftResult<Self> {
        let config: ScheduleConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ShiftResult<()> {
        self.weekday_band.validate()?;
        self.weekend_band.validate()?;
        if self.max_consecutive_days == 0 {
            return Err(ShiftError::InvalidConfig(
                "max_consecutive_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
