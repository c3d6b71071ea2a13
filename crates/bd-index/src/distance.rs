//! Plant → farm distance table.
//!
//! # Data layout
//!
//! A dense row-major matrix with one row per plant:
//!
//! ```text
//! km[ plant * farm_count + farm ]
//! ```
//!
//! Scoring walks one plant's row against every valid farm, so a row is a
//! contiguous scan.  A missing entry is stored as `NaN` and surfaces as
//! `None` from [`DistanceIndex::get`]; the engine skips such farms.

use bd_core::{FarmId, FarmRegistry, GeoPoint, PlantId, PlantRegistry};

use crate::{IndexError, IndexResult};

/// One-way great-circle distances in kilometres for every (plant, farm) pair.
#[derive(Clone, Debug)]
pub struct DistanceIndex {
    plant_count: usize,
    farm_count:  usize,
    km:          Vec<f64>,
}

impl DistanceIndex {
    /// Compute the full haversine matrix from the site registries.
    ///
    /// O(plants × farms).  With the `parallel` feature rows are computed on
    /// Rayon; the result is bit-identical to the sequential build.
    pub fn build(plants: &PlantRegistry, farms: &FarmRegistry) -> Self {
        let plant_pos: Vec<GeoPoint> = plants.iter().map(|(_, p)| p.location).collect();
        let farm_pos: Vec<GeoPoint> = farms.iter().map(|(_, f)| f.location).collect();
        let farm_count = farm_pos.len();
        let mut km = vec![f64::NAN; plant_pos.len() * farm_count];

        let fill_row = |row: &mut [f64], from: GeoPoint| {
            for (cell, &to) in row.iter_mut().zip(&farm_pos) {
                *cell = if from.is_finite() && to.is_finite() {
                    from.distance_km(to)
                } else {
                    f64::NAN
                };
            }
        };

        if farm_count > 0 {
            #[cfg(not(feature = "parallel"))]
            {
                for (row, &from) in km.chunks_mut(farm_count).zip(&plant_pos) {
                    fill_row(row, from);
                }
            }

            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                km.par_chunks_mut(farm_count)
                    .zip(plant_pos.par_iter())
                    .for_each(|(row, &from)| fill_row(row, from));
            }
        }

        tracing::debug!(
            plants = plant_pos.len(),
            farms = farm_count,
            "built distance index"
        );

        Self { plant_count: plant_pos.len(), farm_count, km }
    }

    /// A table of the given shape with every entry missing.
    ///
    /// Use with [`insert`][Self::insert] when distances come from an external
    /// source (e.g. a road-network table) that may not cover every pair.
    pub fn sparse(plant_count: usize, farm_count: usize) -> Self {
        Self {
            plant_count,
            farm_count,
            km: vec![f64::NAN; plant_count * farm_count],
        }
    }

    /// Set the distance for one pair.
    pub fn insert(&mut self, plant: PlantId, farm: FarmId, km: f64) -> IndexResult<()> {
        if !(km.is_finite() && km >= 0.0) {
            return Err(IndexError::InvalidDistance { plant, farm, km });
        }
        let slot = self.slot(plant, farm)?;
        self.km[slot] = km;
        Ok(())
    }

    /// Mark one pair as missing.
    pub fn remove(&mut self, plant: PlantId, farm: FarmId) -> IndexResult<()> {
        let slot = self.slot(plant, farm)?;
        self.km[slot] = f64::NAN;
        Ok(())
    }

    /// One-way distance in km, or `None` if the pair has no entry.
    #[inline]
    pub fn get(&self, plant: PlantId, farm: FarmId) -> Option<f64> {
        if plant.index() >= self.plant_count || farm.index() >= self.farm_count {
            return None;
        }
        let km = self.km[plant.index() * self.farm_count + farm.index()];
        (!km.is_nan()).then_some(km)
    }

    pub fn plant_count(&self) -> usize {
        self.plant_count
    }

    pub fn farm_count(&self) -> usize {
        self.farm_count
    }

    /// Number of pairs with a distance.
    pub fn known_pairs(&self) -> usize {
        self.km.iter().filter(|km| !km.is_nan()).count()
    }

    fn slot(&self, plant: PlantId, farm: FarmId) -> IndexResult<usize> {
        if plant.index() >= self.plant_count || farm.index() >= self.farm_count {
            return Err(IndexError::OutOfBounds {
                plant,
                farm,
                plants: self.plant_count,
                farms:  self.farm_count,
            });
        }
        Ok(plant.index() * self.farm_count + farm.index())
    }
}
