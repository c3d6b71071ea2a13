//! Daily nitrogen demand.
//!
//! [`DemandTable`] is the read-only input: date → per-farm demand in kg N.
//! [`DemandTracker`] is the engine's private, day-scoped residual copy of one
//! row.  The tracker only ever decreases and is dropped at day end, so the
//! table itself is never mutated.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use bd_core::FarmId;

use crate::{DispatchError, DispatchResult};

// ── DemandTable ───────────────────────────────────────────────────────────────

/// Per-day, per-farm nitrogen demand (kg).  Missing entries read as zero.
#[derive(Clone, Debug)]
pub struct DemandTable {
    farm_count: usize,
    by_date:    BTreeMap<NaiveDate, Vec<f64>>,
}

impl DemandTable {
    pub fn new(farm_count: usize) -> Self {
        Self { farm_count, by_date: BTreeMap::new() }
    }

    /// Add one day of demand, one value per farm in `FarmId` order.
    pub fn insert_day(&mut self, date: NaiveDate, demand_kg: Vec<f64>) -> DispatchResult<()> {
        if demand_kg.len() != self.farm_count {
            return Err(DispatchError::DimensionMismatch {
                expected: self.farm_count,
                got:      demand_kg.len(),
                what:     "demand row",
            });
        }
        if let Some((i, &kg)) = demand_kg
            .iter()
            .enumerate()
            .find(|(_, kg)| !(kg.is_finite() && **kg >= 0.0))
        {
            return Err(DispatchError::InvalidDemand { date, farm: FarmId(i as u32), kg });
        }
        if self.by_date.contains_key(&date) {
            return Err(DispatchError::DuplicateDemandDate(date));
        }
        self.by_date.insert(date, demand_kg);
        Ok(())
    }

    pub fn farm_count(&self) -> usize {
        self.farm_count
    }

    /// Number of dates with a demand row.
    pub fn days(&self) -> usize {
        self.by_date.len()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// The row for `date`, if present.
    pub fn day(&self, date: NaiveDate) -> Option<&[f64]> {
        self.by_date.get(&date).map(Vec::as_slice)
    }

    /// Demand for one farm on one day; zero when either is missing.
    #[inline]
    pub fn demand(&self, date: NaiveDate, farm: FarmId) -> f64 {
        self.day(date)
            .and_then(|row| row.get(farm.index()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of every entry in the table (kg N).
    pub fn annual_total(&self) -> f64 {
        self.by_date.values().flatten().sum()
    }
}

// ── DemandTracker ─────────────────────────────────────────────────────────────

/// Residual demand for a single simulated day.
#[derive(Clone, Debug)]
pub struct DemandTracker {
    date:     NaiveDate,
    residual: Vec<f64>,
}

impl DemandTracker {
    /// Snapshot `date`'s demand.  Farms without an entry start at zero.
    pub fn open(table: &DemandTable, date: NaiveDate) -> Self {
        let residual = match table.day(date) {
            Some(row) => row.to_vec(),
            None => vec![0.0; table.farm_count()],
        };
        Self { date, residual }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn residual(&self, farm: FarmId) -> f64 {
        self.residual.get(farm.index()).copied().unwrap_or(0.0)
    }

    /// Subtract `n_kg` of delivered nitrogen, flooring at zero.  Returns the
    /// new residual.
    pub fn consume(&mut self, farm: FarmId, n_kg: f64) -> f64 {
        match self.residual.get_mut(farm.index()) {
            Some(r) => {
                *r = (*r - n_kg).max(0.0);
                *r
            }
            None => 0.0,
        }
    }
}
