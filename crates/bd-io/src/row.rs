//! Plain record types shared by the CSV and SQLite backends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bd_core::{FarmRegistry, PlantRegistry};
use bd_dispatch::{DaySummary, DeliveryEvent};

/// One line of `solution.csv`.  Plants and farms are named by their external
/// ids, not by dense index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRow {
    pub date:           NaiveDate,
    pub stp_id:         String,
    pub farm_id:        String,
    pub tons_delivered: f64,
}

impl DeliveryRow {
    pub fn from_event(event: &DeliveryEvent, plants: &PlantRegistry, farms: &FarmRegistry) -> Self {
        Self {
            date:           event.date,
            stp_id:         plants.get(event.plant).name.clone(),
            farm_id:        farms.get(event.farm).name.clone(),
            tons_delivered: event.tons,
        }
    }
}

/// Column order of `daily_summary.csv`, matching the fields of
/// [`DaySummaryRow`].
pub const DAY_SUMMARY_HEADER: [&str; 8] = [
    "date",
    "valid_farms",
    "locked_farms",
    "dispatches",
    "tons_shipped",
    "dumped_tons",
    "overflow_penalty",
    "closing_inventory",
];

/// One line of `daily_summary.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySummaryRow {
    pub date:              NaiveDate,
    pub valid_farms:       u32,
    pub locked_farms:      u32,
    pub dispatches:        u32,
    pub tons_shipped:      f64,
    pub dumped_tons:       f64,
    pub overflow_penalty:  f64,
    pub closing_inventory: f64,
}

impl From<&DaySummary> for DaySummaryRow {
    fn from(s: &DaySummary) -> Self {
        Self {
            date:              s.date,
            valid_farms:       s.valid_farms as u32,
            locked_farms:      s.locked_farms as u32,
            dispatches:        s.dispatches as u32,
            tons_shipped:      s.tons_shipped,
            dumped_tons:       s.dumped_tons,
            overflow_penalty:  s.overflow_penalty,
            closing_inventory: s.closing_inventory,
        }
    }
}
