//! Index-building error type.

use chrono::NaiveDate;
use thiserror::Error;

use bd_core::{FarmId, PlantId};

/// Errors produced by `bd-index`.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("distance for {plant} → {farm} must be a non-negative number, got {km}")]
    InvalidDistance { plant: PlantId, farm: FarmId, km: f64 },

    #[error("{plant} → {farm} is outside the {plants}×{farms} distance table")]
    OutOfBounds {
        plant:  PlantId,
        farm:   FarmId,
        plants: usize,
        farms:  usize,
    },

    #[error("rainfall row for {date} has {got} values, expected {expected}")]
    RowWidth {
        date:     NaiveDate,
        expected: usize,
        got:      usize,
    },

    #[error("rainfall table lists {0} more than once")]
    DuplicateDate(NaiveDate),

    #[error("rainfall on {date} in zone {zone:?} must be a non-negative number, got {mm}")]
    InvalidRainfall {
        date: NaiveDate,
        zone: String,
        mm:   f64,
    },

    #[error("rain-lock window must be at least one day")]
    ZeroWindow,
}

pub type IndexResult<T> = Result<T, IndexError>;
