//! The static inputs of a run, bundled.
//!
//! A `Scenario` owns everything that stays fixed for the whole year: the
//! config, both registries, both precomputed indices and the demand table.
//! The engine and the reconciler each borrow the same `Scenario`, which is
//! what lets the reconciler replay a solution against exactly the data the
//! engine saw.

use bd_core::{DispatchConfig, FarmRegistry, PlantRegistry, SimYear};
use bd_index::{DistanceIndex, RainLockIndex, RainfallTable};

use crate::{DemandTable, DispatchError, DispatchResult};

#[derive(Clone, Debug)]
pub struct Scenario {
    pub config:     DispatchConfig,
    pub plants:     PlantRegistry,
    pub farms:      FarmRegistry,
    pub distances:  DistanceIndex,
    pub rain_locks: RainLockIndex,
    pub demand:     DemandTable,
    year:           SimYear,
}

impl Scenario {
    /// Validate the config and build both indices from raw inputs.
    pub fn new(
        config:   DispatchConfig,
        plants:   PlantRegistry,
        farms:    FarmRegistry,
        rainfall: &RainfallTable,
        demand:   DemandTable,
    ) -> DispatchResult<Self> {
        config.validate()?;
        let distances = DistanceIndex::build(&plants, &farms);
        let rain_locks = RainLockIndex::build(
            rainfall,
            &farms,
            config.rain_lock_threshold_mm,
            config.rain_lock_window_days,
        )?;
        Self::from_parts(config, plants, farms, distances, rain_locks, demand)
    }

    /// Assemble a scenario from prebuilt indices, checking that every table
    /// has the registries' dimensions.
    pub fn from_parts(
        config:     DispatchConfig,
        plants:     PlantRegistry,
        farms:      FarmRegistry,
        distances:  DistanceIndex,
        rain_locks: RainLockIndex,
        demand:     DemandTable,
    ) -> DispatchResult<Self> {
        config.validate()?;
        check_dim("distance rows", plants.len(), distances.plant_count())?;
        check_dim("distance columns", farms.len(), distances.farm_count())?;
        check_dim("rain-lock zones", farms.zone_count(), rain_locks.zone_count())?;
        check_dim("demand columns", farms.len(), demand.farm_count())?;

        let year = config.sim_year()?;
        Ok(Self { config, plants, farms, distances, rain_locks, demand, year })
    }

    pub fn year(&self) -> SimYear {
        self.year
    }
}

fn check_dim(what: &'static str, expected: usize, got: usize) -> DispatchResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(DispatchError::DimensionMismatch { expected, got, what })
    }
}
