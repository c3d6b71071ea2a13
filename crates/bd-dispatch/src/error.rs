use chrono::NaiveDate;
use thiserror::Error;

use bd_core::{CoreError, FarmId, PlantId};
use bd_index::IndexError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("{what} length {got} does not match {expected}")]
    DimensionMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("demand table lists {0} more than once")]
    DuplicateDemandDate(NaiveDate),

    #[error("demand on {date} for {farm} must be a non-negative number, got {kg}")]
    InvalidDemand {
        date: NaiveDate,
        farm: FarmId,
        kg:   f64,
    },

    #[error("initial inventory for {plant} must be a non-negative number, got {tons}")]
    InvalidInventory { plant: PlantId, tons: f64 },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
