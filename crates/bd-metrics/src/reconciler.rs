//! `MetricsReconciler` — replays a delivery log into a [`Scoreboard`].
//!
//! The replay never looks at engine state.  It starts from the opening
//! inventory, walks the calendar year, and for each day:
//!
//! 1. adds every plant's output,
//! 2. charges transport and withdraws tons for each logged delivery,
//! 3. sums the day's tons **per farm** and scores the total against that
//!    day's original demand,
//! 4. clamps storage to capacity and charges the dumped tons.
//!
//! Step 3 is where the reconciler parts ways with the engine: two trucks to
//! one farm are scored as a single delivery, so leaching here is charged on
//! the combined tonnage rather than truck by truck.
//!
//! Whole-log figures (delivered tons, round-trip kilometres, monsoon share)
//! cover every event, including any dated outside the simulation year.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use bd_core::{FarmId, is_monsoon, nitrogen_split};
use bd_dispatch::{DeliveryEvent, Scenario, Solution};

use crate::{Details, Gains, MetricsError, MetricsResult, Penalties, Scoreboard};

/// Replays a [`Solution`] against a [`Scenario`].
///
/// ```rust,ignore
/// let board = MetricsReconciler::new(&scenario).reconcile(&run.solution)?;
/// println!("{:.2}", board.scoreboard.net_carbon_credit_score);
/// ```
pub struct MetricsReconciler<'a> {
    scenario:  &'a Scenario,
    inventory: Option<Vec<f64>>,
}

impl<'a> MetricsReconciler<'a> {
    pub fn new(scenario: &'a Scenario) -> Self {
        Self { scenario, inventory: None }
    }

    /// Opening inventory per plant; every plant starts empty otherwise.
    pub fn initial_inventory(mut self, tons: Vec<f64>) -> Self {
        self.inventory = Some(tons);
        self
    }

    pub fn reconcile(&self, solution: &Solution) -> MetricsResult<Scoreboard> {
        let scenario = self.scenario;
        let config = &scenario.config;
        let plants = &scenario.plants;
        self.check_events(solution)?;

        let mut storage = match &self.inventory {
            Some(tons) if tons.len() != plants.len() => {
                return Err(MetricsError::InventoryLength { expected: plants.len(), got: tons.len() });
            }
            Some(tons) => tons.clone(),
            None => vec![0.0; plants.len()],
        };

        let mut by_day: FxHashMap<NaiveDate, Vec<&DeliveryEvent>> = FxHashMap::default();
        for event in solution {
            by_day.entry(event.date).or_default().push(event);
        }

        let year = scenario.year();
        let outside = solution.iter().filter(|e| !year.contains(e.date)).count();
        if outside > 0 {
            tracing::warn!(
                events = outside,
                year = year.year(),
                "deliveries outside the simulation year skipped by the daily replay"
            );
        }

        let mut gains = Gains::default();
        let mut penalties = Penalties::default();

        for date in year.days() {
            for (inv, (_, plant)) in storage.iter_mut().zip(plants.iter()) {
                *inv += plant.daily_output_tons;
            }

            if let Some(moves) = by_day.get(&date) {
                let mut farm_tons: BTreeMap<FarmId, f64> = BTreeMap::new();
                for event in moves {
                    let km = scenario.distances.get(event.plant, event.farm).unwrap_or(0.0);
                    penalties.transport_emissions += config.transport_emission(km);
                    storage[event.plant.index()] -= event.tons;
                    *farm_tons.entry(event.farm).or_default() += event.tons;
                }

                for (farm, tons) in farm_tons {
                    let delivered_n = config.package_nitrogen(tons);
                    let (useful_n, excess_n) = nitrogen_split(delivered_n, scenario.demand.demand(date, farm));
                    gains.synthetic_fertilizer_offset += config.offset_gain(useful_n);
                    gains.soil_carbon_sequestration += config.sequestration_gain(tons);
                    penalties.nitrogen_leaching += config.leaching_penalty(excess_n);
                }
            }

            for (inv, (plant_id, plant)) in storage.iter_mut().zip(plants.iter()) {
                if *inv < 0.0 {
                    tracing::warn!(%date, plant = %plant_id, inventory = *inv, "replayed storage below zero");
                }
                if *inv > plant.storage_max_tons {
                    penalties.stp_overflow += config.overflow_penalty(*inv - plant.storage_max_tons);
                    *inv = plant.storage_max_tons;
                }
            }
        }

        let delivered_tons = solution.total_tons();
        let round_trip_km: f64 = solution
            .iter()
            .map(|e| 2.0 * scenario.distances.get(e.plant, e.farm).unwrap_or(0.0))
            .sum();
        let monsoon_tons: f64 = solution.iter().filter(|e| is_monsoon(e.date)).map(|e| e.tons).sum();

        let details = Details {
            total_delivered_tons: delivered_tons,
            total_demand_n_kg:    scenario.demand.annual_total(),
            total_delivered_n_kg: config.package_nitrogen(delivered_tons),
            total_round_trip_km:  round_trip_km,
        };
        let board = Scoreboard::from_components(details, gains, penalties, monsoon_tons);

        tracing::info!(
            events = solution.len(),
            net_score = board.scoreboard.net_carbon_credit_score,
            delivered_tons,
            "reconciled delivery log"
        );
        Ok(board)
    }

    fn check_events(&self, solution: &Solution) -> MetricsResult<()> {
        let plants = self.scenario.plants.len();
        let farms = self.scenario.farms.len();
        for e in solution {
            if e.plant.index() >= plants {
                return Err(MetricsError::UnknownPlant { date: e.date, plant: e.plant });
            }
            if e.farm.index() >= farms {
                return Err(MetricsError::UnknownFarm { date: e.date, farm: e.farm });
            }
            if !(e.tons.is_finite() && e.tons >= 0.0) {
                return Err(MetricsError::InvalidTonnage { date: e.date, plant: e.plant, tons: e.tons });
            }
        }
        Ok(())
    }
}
