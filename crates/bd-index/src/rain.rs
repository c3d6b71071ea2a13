//! Daily rainfall and the forward-looking rain-lock table.
//!
//! # Lock rule
//!
//! For table row `d` (dates ascending) and zone `z`:
//!
//! ```text
//! forward_mm(d, z) = Σ rainfall[d ..= min(d + W - 1, last_row)][z]
//! locked(d, z)     = forward_mm(d, z) > threshold_mm
//! ```
//!
//! The window runs over table rows, so near the end of the table it is
//! truncated to the rows that remain and the partial sum is still compared
//! against the full threshold.  Dates that are not in the table and zones
//! with no rainfall column are never locked.

use chrono::NaiveDate;

use bd_core::{FarmRegistry, ZoneId};

use crate::{IndexError, IndexResult};

// ── RainfallTable ─────────────────────────────────────────────────────────────

/// Daily rainfall (mm), one row per date and one column per zone name.
#[derive(Clone, Debug)]
pub struct RainfallTable {
    zones: Vec<String>,
    dates: Vec<NaiveDate>,
    /// Row-major `dates.len() × zones.len()`.
    mm:    Vec<f64>,
}

impl RainfallTable {
    /// Build a table from `(date, values)` rows in any order.
    ///
    /// Rows are sorted by date.  Every row must have one value per zone.
    pub fn new(
        zones: Vec<String>,
        mut rows: Vec<(NaiveDate, Vec<f64>)>,
    ) -> IndexResult<Self> {
        rows.sort_by_key(|(date, _)| *date);

        let mut dates = Vec::with_capacity(rows.len());
        let mut mm = Vec::with_capacity(rows.len() * zones.len());

        for (date, values) in rows {
            if values.len() != zones.len() {
                return Err(IndexError::RowWidth {
                    date,
                    expected: zones.len(),
                    got:      values.len(),
                });
            }
            if dates.last() == Some(&date) {
                return Err(IndexError::DuplicateDate(date));
            }
            for (zone, &v) in zones.iter().zip(&values) {
                if !(v.is_finite() && v >= 0.0) {
                    return Err(IndexError::InvalidRainfall { date, zone: zone.clone(), mm: v });
                }
            }
            dates.push(date);
            mm.extend(values);
        }

        Ok(Self { zones, dates, mm })
    }

    pub fn zones(&self) -> &[String] {
        &self.zones
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rainfall for `(row, column)`.
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.mm[row * self.zones.len() + col]
    }

    fn column(&self, zone: &str) -> Option<usize> {
        self.zones.iter().position(|z| z == zone)
    }
}

// ── RainLockIndex ─────────────────────────────────────────────────────────────

/// `(date, zone) → locked`, precomputed for every table date and farm zone.
#[derive(Clone, Debug)]
pub struct RainLockIndex {
    dates:      Vec<NaiveDate>,
    zone_count: usize,
    /// Row-major `dates.len() × zone_count`; `NaN` where the zone has no
    /// rainfall column.
    forward_mm: Vec<f64>,
    locked:     Vec<bool>,
}

impl RainLockIndex {
    /// Precompute lock flags for every zone in `farms`.
    pub fn build(
        table:        &RainfallTable,
        farms:        &FarmRegistry,
        threshold_mm: f64,
        window_days:  usize,
    ) -> IndexResult<Self> {
        if window_days == 0 {
            return Err(IndexError::ZeroWindow);
        }

        let rows = table.len();
        let zone_count = farms.zone_count();
        let mut forward_mm = vec![f64::NAN; rows * zone_count];
        let mut locked = vec![false; rows * zone_count];

        for z in 0..zone_count {
            let name = farms.zone_name(ZoneId(z as u16));
            let Some(col) = table.column(name) else {
                tracing::warn!(zone = name, "no rainfall column; zone is never locked");
                continue;
            };

            for row in 0..rows {
                let end = (row + window_days).min(rows);
                let sum: f64 = (row..end).map(|r| table.value(r, col)).sum();
                forward_mm[row * zone_count + z] = sum;
                locked[row * zone_count + z] = sum > threshold_mm;
            }
        }

        let index = Self {
            dates: table.dates().to_vec(),
            zone_count,
            forward_mm,
            locked,
        };
        tracing::debug!(
            dates = rows,
            zones = zone_count,
            locked_cells = index.locked.iter().filter(|&&l| l).count(),
            "built rain-lock index"
        );
        Ok(index)
    }

    /// An index with no dates: nothing is ever locked.
    pub fn unlocked(zone_count: usize) -> Self {
        Self {
            dates: Vec::new(),
            zone_count,
            forward_mm: Vec::new(),
            locked: Vec::new(),
        }
    }

    #[inline]
    fn cell(&self, date: NaiveDate, zone: ZoneId) -> Option<usize> {
        if zone.index() >= self.zone_count {
            return None;
        }
        let row = self.dates.binary_search(&date).ok()?;
        Some(row * self.zone_count + zone.index())
    }

    /// `true` if deliveries into `zone` are blocked on `date`.
    #[inline]
    pub fn is_locked(&self, date: NaiveDate, zone: ZoneId) -> bool {
        self.cell(date, zone).is_some_and(|c| self.locked[c])
    }

    /// The forward rainfall sum behind the lock flag, if the zone has data
    /// for `date`.
    pub fn forward_mm(&self, date: NaiveDate, zone: ZoneId) -> Option<f64> {
        self.cell(date, zone)
            .map(|c| self.forward_mm[c])
            .filter(|mm| !mm.is_nan())
    }

    /// Zones locked on `date`, ascending.
    pub fn locked_zones(&self, date: NaiveDate) -> Vec<ZoneId> {
        (0..self.zone_count)
            .map(|z| ZoneId(z as u16))
            .filter(|&z| self.is_locked(date, z))
            .collect()
    }

    pub fn zone_count(&self) -> usize {
        self.zone_count
    }
}
