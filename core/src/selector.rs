//! Candidate selector: random headcount, random sample, random band.
//!
//! No balancing of any kind: headcount is uniform within the band,
//! the sample is uniform over the pool, and each chosen employee's
//! time band is an independent uniform draw.

use crate::{
    config::StaffingBand,
    model::TimeBand,
    rng::{RngBank, RngStream, ShiftRng},
    types::EmployeeId,
};

/// The three RNG streams a selection consumes.
pub struct SelectorRngs {
    headcount: ShiftRng,
    sampling: ShiftRng,
    time_band: ShiftRng,
}

impl SelectorRngs {
    pub fn from_bank(bank: &RngBank) -> Self {
        Self {
            headcount: bank.for_stream(RngStream::Headcount),
            sampling: bank.for_stream(RngStream::Sampling),
            time_band: bank.for_stream(RngStream::TimeBand),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySelection {
    /// Headcount drawn from the band before capping by pool size.
    pub target: u32,
    /// Chosen employees in pool order, each with a time band.
    pub chosen: Vec<(EmployeeId, TimeBand)>,
}

impl DaySelection {
    pub fn headcount(&self) -> usize {
        self.chosen.len()
    }

    /// Fewer people chosen than the band minimum asks for.
    pub fn is_understaffed(&self, band: StaffingBand) -> bool {
        (self.chosen.len() as u64) < band.min as u64
    }
}

/// Pick who works and when. An empty pool yields an empty selection.
pub fn select(pool: &[EmployeeId], band: StaffingBand, rngs: &mut SelectorRngs) -> DaySelection {
    if pool.is_empty() {
        return DaySelection {
            target: 0,
            chosen: Vec::new(),
        };
    }

    let target = rngs.headcount.between_inclusive(band.min, band.max);
    let n = pool.len().min(target as usize);

    let mut picked = rngs.sampling.distinct_indices(pool.len(), n);
    picked.sort_unstable();

    let chosen = picked
        .into_iter()
        .map(|i| (pool[i], *rngs.time_band.pick(&TimeBand::ALL)))
        .collect();

    DaySelection { target, chosen }
}
