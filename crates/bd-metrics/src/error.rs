//! Error types for bd-metrics.

use chrono::NaiveDate;
use thiserror::Error;

use bd_core::{CoreError, FarmId, PlantId};

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("delivery on {date} names {plant}, which is not in the plant registry")]
    UnknownPlant { date: NaiveDate, plant: PlantId },

    #[error("delivery on {date} names {farm}, which is not in the farm registry")]
    UnknownFarm { date: NaiveDate, farm: FarmId },

    #[error("delivery on {date} from {plant} carries {tons} t; tonnage must be a non-negative number")]
    InvalidTonnage { date: NaiveDate, plant: PlantId, tons: f64 },

    #[error("initial inventory has {got} entries, expected {expected}")]
    InventoryLength { expected: usize, got: usize },
}

pub type MetricsResult<T> = Result<T, MetricsError>;
