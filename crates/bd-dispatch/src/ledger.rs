//! The `StorageLedger` — per-plant inventory.
//!
//! Inventory moves three ways during a day:
//!
//! 1. [`replenish`][StorageLedger::replenish] adds each plant's fixed output.
//! 2. [`withdraw`][StorageLedger::withdraw] removes a dispatched truckload.
//! 3. [`clamp_overflow`][StorageLedger::clamp_overflow] dumps anything above
//!    capacity, once, after every plant has been dispatched.
//!
//! Between steps 1 and 3 a plant may legitimately hold more than its
//! capacity; that is exactly what makes it urgent.

use bd_core::{PlantId, PlantRegistry};

/// Per-plant inventory in tons, indexed by [`PlantId`].
#[derive(Clone, Debug)]
pub struct StorageLedger {
    inventory: Vec<f64>,
    capacity:  Vec<f64>,
    output:    Vec<f64>,
}

impl StorageLedger {
    /// A ledger with every plant empty.
    pub fn new(plants: &PlantRegistry) -> Self {
        Self {
            inventory: vec![0.0; plants.len()],
            capacity:  plants.iter().map(|(_, p)| p.storage_max_tons).collect(),
            output:    plants.iter().map(|(_, p)| p.daily_output_tons).collect(),
        }
    }

    pub(crate) fn set_inventory(&mut self, plant: PlantId, tons: f64) {
        self.inventory[plant.index()] = tons;
    }

    /// Add one day of output to every plant.
    pub fn replenish(&mut self) {
        for (inv, out) in self.inventory.iter_mut().zip(&self.output) {
            *inv += out;
        }
    }

    /// Remove up to `tons` from `plant` and return the amount actually taken.
    ///
    /// Callers size shipments from the current inventory, so the clamp only
    /// absorbs rounding.
    pub fn withdraw(&mut self, plant: PlantId, tons: f64) -> f64 {
        let inv = &mut self.inventory[plant.index()];
        debug_assert!(tons <= *inv, "withdraw {tons} from {plant} holding {inv}");
        let taken = tons.min(*inv).max(0.0);
        *inv -= taken;
        taken
    }

    /// Dump everything above capacity.  Returns `(plant, dumped_tons)` for
    /// each plant that overflowed, in ascending `PlantId` order.
    pub fn clamp_overflow(&mut self) -> Vec<(PlantId, f64)> {
        let mut dumped = Vec::new();
        for (i, (inv, &cap)) in self.inventory.iter_mut().zip(&self.capacity).enumerate() {
            if *inv > cap {
                dumped.push((PlantId(i as u32), *inv - cap));
                *inv = cap;
            }
        }
        dumped
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    #[inline]
    pub fn inventory(&self, plant: PlantId) -> f64 {
        self.inventory[plant.index()]
    }

    #[inline]
    pub fn capacity(&self, plant: PlantId) -> f64 {
        self.capacity[plant.index()]
    }

    /// Tons above capacity, or zero.
    #[inline]
    pub fn excess(&self, plant: PlantId) -> f64 {
        (self.inventory(plant) - self.capacity(plant)).max(0.0)
    }

    #[inline]
    pub fn fill_ratio(&self, plant: PlantId) -> f64 {
        self.inventory(plant) / self.capacity(plant)
    }

    #[inline]
    pub fn is_overflowing(&self, plant: PlantId) -> bool {
        self.inventory(plant) > self.capacity(plant)
    }

    pub fn inventories(&self) -> &[f64] {
        &self.inventory
    }

    pub fn total_inventory(&self) -> f64 {
        self.inventory.iter().sum()
    }
}
