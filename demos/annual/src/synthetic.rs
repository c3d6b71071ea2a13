//! Seeded synthetic data set.
//!
//! Four treatment plants around a city centre, farms scattered over five
//! rainfall zones north to south, a June–September monsoon that hits the
//! coastal zones hardest, and two cropping seasons of nitrogen demand.
//! Same seed, same scenario.

use anyhow::Result;
use chrono::Datelike;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use bd_core::{DispatchConfig, FarmRegistry, GeoPoint, Plant, PlantRegistry, is_monsoon};
use bd_dispatch::{DemandTable, Scenario};
use bd_index::RainfallTable;

pub const FARM_COUNT: usize = 60;

const CENTRE: GeoPoint = GeoPoint { lat: 10.0, lon: 76.3 };
const ZONES: [&str; 5] = ["Z1", "Z2", "Z3", "Z4", "Z5"];

/// `(name, daily output t, storage t, lat offset, lon offset)`
const PLANTS: [(&str, f64, f64, f64, f64); 4] = [
    ("STP_01", 24.0, 110.0, 0.00, 0.00),
    ("STP_02", 14.0, 45.0, 0.25, 0.05),
    ("STP_03", 9.0, 60.0, -0.30, 0.10),
    ("STP_04", 6.0, 18.0, 0.10, -0.15),
];

pub fn config() -> DispatchConfig {
    DispatchConfig {
        truck_capacity_tons:         10.0,
        nitrogen_content_kg_per_ton: 25.0,
        synthetic_offset_credit:     5.0,
        sequestration_credit:        0.2,
        transport_emission_per_km:   0.9,
        overflow_penalty_per_ton:    1_000.0,
        leaching_penalty_per_kg_n:   10.0,
        rain_lock_threshold_mm:      30.0,
        rain_lock_window_days:       5,
        year:                        2025,
    }
}

pub fn build(seed: u64) -> Result<Scenario> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = config();
    let year = config.sim_year()?;

    let plants = PlantRegistry::from_plants(PLANTS.iter().map(|&(name, out, cap, dlat, dlon)| Plant {
        name:              name.into(),
        location:          GeoPoint::new(CENTRE.lat + dlat, CENTRE.lon + dlon),
        daily_output_tons: out,
        storage_max_tons:  cap,
    }))?;

    // Farms: zone follows latitude band, Z1 northernmost.
    let mut farms = FarmRegistry::new();
    let mut base_demand = Vec::with_capacity(FARM_COUNT);
    for i in 0..FARM_COUNT {
        let dlat: f64 = rng.gen_range(-0.6..0.6);
        let dlon: f64 = rng.gen_range(-0.4..0.4);
        let band = (((0.6 - dlat) / 1.2) * ZONES.len() as f64) as usize;
        let zone = ZONES[band.min(ZONES.len() - 1)];
        farms.push(
            &format!("F_{}", 1000 + i),
            GeoPoint::new(CENTRE.lat + dlat, CENTRE.lon + dlon),
            zone,
        )?;
        base_demand.push(rng.gen_range(40.0..320.0));
    }

    // Rainfall: light showers all year, heavy bursts in the monsoon that
    // taper off inland (higher zone index).
    let mut rows = Vec::with_capacity(year.len());
    for date in year.days() {
        let values = (0..ZONES.len())
            .map(|z| {
                if is_monsoon(date) {
                    let intensity = 1.0 - 0.15 * z as f64;
                    if rng.gen_bool(0.45) { rng.gen_range(4.0..30.0) * intensity } else { rng.gen_range(0.0..3.0) }
                } else if rng.gen_bool(0.1) {
                    rng.gen_range(2.0..15.0)
                } else {
                    0.0
                }
            })
            .collect();
        rows.push((date, values));
    }
    let rainfall = RainfallTable::new(ZONES.iter().map(|z| z.to_string()).collect(), rows)?;

    // Demand: two cropping seasons (Feb–Apr, Aug–Nov); a trickle otherwise.
    let mut demand = DemandTable::new(FARM_COUNT);
    for date in year.days() {
        let season = match date.month() {
            2..=4 | 8..=11 => 1.0,
            5 | 12 => 0.4,
            _ => 0.1,
        };
        let day: Vec<f64> = base_demand
            .iter()
            .map(|&base| base * season * rng.gen_range(0.7..1.3))
            .collect();
        demand.insert_day(date, day)?;
    }

    Ok(Scenario::new(config, plants, farms, &rainfall, demand)?)
}
