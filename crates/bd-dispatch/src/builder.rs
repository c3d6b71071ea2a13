//! Fluent builder for constructing a [`DispatchEngine`].

use bd_core::PlantId;

use crate::{DispatchEngine, DispatchError, DispatchResult, EngineTotals, Scenario, Solution, StorageLedger};

/// Fluent builder for [`DispatchEngine`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                 |
/// |--------------------------|-------------------------|
/// | `.initial_inventory(v)`  | Every plant starts empty |
///
/// # Example
///
/// ```rust,ignore
/// let scenario = Scenario::new(config, plants, farms, &rainfall, demand)?;
/// let run = EngineBuilder::new(&scenario).build()?.run(&mut NoopObserver);
/// ```
pub struct EngineBuilder<'a> {
    scenario:  &'a Scenario,
    inventory: Option<Vec<f64>>,
}

impl<'a> EngineBuilder<'a> {
    pub fn new(scenario: &'a Scenario) -> Self {
        Self { scenario, inventory: None }
    }

    /// Opening inventory per plant (tons), indexed by `PlantId`.
    ///
    /// Must be length `plant_count`.  Values above capacity are allowed; such
    /// plants start the first day already urgent.
    pub fn initial_inventory(mut self, tons: Vec<f64>) -> Self {
        self.inventory = Some(tons);
        self
    }

    /// Validate inputs and return an engine positioned on January 1.
    pub fn build(self) -> DispatchResult<DispatchEngine<'a>> {
        let plants = &self.scenario.plants;
        let mut ledger = StorageLedger::new(plants);

        if let Some(tons) = self.inventory {
            if tons.len() != plants.len() {
                return Err(DispatchError::DimensionMismatch {
                    expected: plants.len(),
                    got:      tons.len(),
                    what:     "initial inventory",
                });
            }
            for (i, &t) in tons.iter().enumerate() {
                let plant = PlantId(i as u32);
                if !(t.is_finite() && t >= 0.0) {
                    return Err(DispatchError::InvalidInventory { plant, tons: t });
                }
                ledger.set_inventory(plant, t);
            }
        }

        Ok(DispatchEngine {
            scenario: self.scenario,
            ledger,
            solution: Solution::new(),
            totals:   EngineTotals::default(),
            next_day: Some(self.scenario.year().first_day()),
        })
    }
}
