//! Plant and farm registries.
//!
//! Registries own the static site data and the mapping between external
//! string ids and the dense typed ids used everywhere else.  Both are
//! immutable once loading has finished; the only mutation API is `push`,
//! which validates the record before assigning it the next id.

use rustc_hash::FxHashMap;

use crate::{CoreError, CoreResult, FarmId, GeoPoint, PlantId, ZoneId};

// ── Plant ─────────────────────────────────────────────────────────────────────

/// A treatment plant producing a fixed tonnage of biosolid every day.
#[derive(Clone, Debug, PartialEq)]
pub struct Plant {
    pub name:              String,
    pub location:          GeoPoint,
    pub daily_output_tons: f64,
    /// On-site storage; anything above this at day end is dumped.
    pub storage_max_tons:  f64,
}

/// All plants of a run, indexed by [`PlantId`].
#[derive(Clone, Debug, Default)]
pub struct PlantRegistry {
    plants:  Vec<Plant>,
    by_name: FxHashMap<String, PlantId>,
}

impl PlantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from plants in order.
    pub fn from_plants(plants: impl IntoIterator<Item = Plant>) -> CoreResult<Self> {
        let mut registry = Self::new();
        for plant in plants {
            registry.push(plant)?;
        }
        Ok(registry)
    }

    /// Validate `plant` and assign it the next [`PlantId`].
    pub fn push(&mut self, plant: Plant) -> CoreResult<PlantId> {
        let invalid = |reason: String| CoreError::InvalidRecord {
            kind: "plant",
            name: plant.name.clone(),
            reason,
        };
        if !plant.location.is_finite() {
            return Err(invalid(format!("malformed coordinates {}", plant.location)));
        }
        if !(plant.daily_output_tons.is_finite() && plant.daily_output_tons >= 0.0) {
            return Err(invalid(format!(
                "daily output must be non-negative, got {}",
                plant.daily_output_tons
            )));
        }
        if !(plant.storage_max_tons.is_finite() && plant.storage_max_tons > 0.0) {
            return Err(invalid(format!(
                "storage capacity must be positive, got {}",
                plant.storage_max_tons
            )));
        }
        if self.by_name.contains_key(&plant.name) {
            return Err(CoreError::DuplicateId { kind: "plant", name: plant.name });
        }

        let id = PlantId::from_index(self.plants.len())?;
        self.by_name.insert(plant.name.clone(), id);
        self.plants.push(plant);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// # Panics
    /// Panics if `id` was not issued by this registry.
    #[inline]
    pub fn get(&self, id: PlantId) -> &Plant {
        &self.plants[id.index()]
    }

    pub fn lookup(&self, name: &str) -> Option<PlantId> {
        self.by_name.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlantId> + '_ {
        (0..self.plants.len() as u32).map(PlantId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlantId, &Plant)> + '_ {
        self.plants
            .iter()
            .enumerate()
            .map(|(i, p)| (PlantId(i as u32), p))
    }

    /// Combined daily output of every plant (tons).
    pub fn total_daily_output(&self) -> f64 {
        self.plants.iter().map(|p| p.daily_output_tons).sum()
    }
}

// ── Farm ──────────────────────────────────────────────────────────────────────

/// A farm that can receive biosolid.  Rain locks apply through its zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Farm {
    pub name:     String,
    pub location: GeoPoint,
    pub zone:     ZoneId,
}

/// All farms of a run, indexed by [`FarmId`], plus the zone name table.
#[derive(Clone, Debug, Default)]
pub struct FarmRegistry {
    farms:        Vec<Farm>,
    by_name:      FxHashMap<String, FarmId>,
    zone_names:   Vec<String>,
    zone_by_name: FxHashMap<String, ZoneId>,
}

impl FarmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a farm, interning its zone name.
    pub fn push(&mut self, name: &str, location: GeoPoint, zone: &str) -> CoreResult<FarmId> {
        if !location.is_finite() {
            return Err(CoreError::InvalidRecord {
                kind:   "farm",
                name:   name.to_owned(),
                reason: format!("malformed coordinates {location}"),
            });
        }
        if self.by_name.contains_key(name) {
            return Err(CoreError::DuplicateId { kind: "farm", name: name.to_owned() });
        }

        let zone = self.intern_zone(zone)?;
        let id = FarmId::from_index(self.farms.len())?;
        self.by_name.insert(name.to_owned(), id);
        self.farms.push(Farm { name: name.to_owned(), location, zone });
        Ok(id)
    }

    fn intern_zone(&mut self, zone: &str) -> CoreResult<ZoneId> {
        if let Some(&id) = self.zone_by_name.get(zone) {
            return Ok(id);
        }
        let id = ZoneId::from_index(self.zone_names.len())?;
        self.zone_by_name.insert(zone.to_owned(), id);
        self.zone_names.push(zone.to_owned());
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.farms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.farms.is_empty()
    }

    /// # Panics
    /// Panics if `id` was not issued by this registry.
    #[inline]
    pub fn get(&self, id: FarmId) -> &Farm {
        &self.farms[id.index()]
    }

    pub fn lookup(&self, name: &str) -> Option<FarmId> {
        self.by_name.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = FarmId> + '_ {
        (0..self.farms.len() as u32).map(FarmId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FarmId, &Farm)> + '_ {
        self.farms
            .iter()
            .enumerate()
            .map(|(i, f)| (FarmId(i as u32), f))
    }

    // ── Zones ─────────────────────────────────────────────────────────────

    pub fn zone_count(&self) -> usize {
        self.zone_names.len()
    }

    pub fn zone_id(&self, name: &str) -> Option<ZoneId> {
        self.zone_by_name.get(name).copied()
    }

    pub fn zone_name(&self, zone: ZoneId) -> &str {
        &self.zone_names[zone.index()]
    }
}
