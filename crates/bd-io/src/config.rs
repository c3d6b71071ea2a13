//! `config.json` loader.
//!
//! # File format
//!
//! ```json
//! {
//!   "logistics_constants": {
//!     "truck_capacity_tons": 10,
//!     "diesel_emission_factor_kg_co2_per_km": 0.9
//!   },
//!   "agronomic_constants": {
//!     "nitrogen_content_kg_per_ton_biosolid": 25,
//!     "synthetic_n_offset_credit_kg_co2_per_kg_n": 5.0,
//!     "soil_organic_carbon_gain_kg_co2_per_kg_biosolid": 0.2,
//!     "leaching_penalty_kg_co2_per_kg_excess_n": 10.0
//!   },
//!   "environmental_thresholds": {
//!     "rain_lock_threshold_mm": 30,
//!     "forecast_window_days": 5,
//!     "stp_overflow_penalty_kg_co2_per_ton": 1000
//!   },
//!   "simulation_metadata": { "year": 2025 }
//! }
//! ```
//!
//! Unknown keys are ignored.  A missing key, a wrong type, or a value that
//! fails [`DispatchConfig::validate`] is an error.

use std::path::Path;

use serde::Deserialize;

use bd_core::DispatchConfig;

use crate::{LoadError, LoadResult};

#[derive(Deserialize)]
struct ConfigFile {
    logistics_constants:      Logistics,
    agronomic_constants:      Agronomic,
    environmental_thresholds: Thresholds,
    simulation_metadata:      Metadata,
}

#[derive(Deserialize)]
struct Logistics {
    truck_capacity_tons:                  f64,
    diesel_emission_factor_kg_co2_per_km: f64,
}

#[derive(Deserialize)]
struct Agronomic {
    nitrogen_content_kg_per_ton_biosolid:            f64,
    synthetic_n_offset_credit_kg_co2_per_kg_n:       f64,
    soil_organic_carbon_gain_kg_co2_per_kg_biosolid: f64,
    leaching_penalty_kg_co2_per_kg_excess_n:         f64,
}

#[derive(Deserialize)]
struct Thresholds {
    rain_lock_threshold_mm:              f64,
    forecast_window_days:                usize,
    stp_overflow_penalty_kg_co2_per_ton: f64,
}

#[derive(Deserialize)]
struct Metadata {
    year: i32,
}

impl From<ConfigFile> for DispatchConfig {
    fn from(f: ConfigFile) -> Self {
        DispatchConfig {
            truck_capacity_tons:         f.logistics_constants.truck_capacity_tons,
            nitrogen_content_kg_per_ton: f.agronomic_constants.nitrogen_content_kg_per_ton_biosolid,
            synthetic_offset_credit:     f.agronomic_constants.synthetic_n_offset_credit_kg_co2_per_kg_n,
            sequestration_credit:        f.agronomic_constants.soil_organic_carbon_gain_kg_co2_per_kg_biosolid,
            transport_emission_per_km:   f.logistics_constants.diesel_emission_factor_kg_co2_per_km,
            overflow_penalty_per_ton:    f.environmental_thresholds.stp_overflow_penalty_kg_co2_per_ton,
            leaching_penalty_per_kg_n:   f.agronomic_constants.leaching_penalty_kg_co2_per_kg_excess_n,
            rain_lock_threshold_mm:      f.environmental_thresholds.rain_lock_threshold_mm,
            rain_lock_window_days:       f.environmental_thresholds.forecast_window_days,
            year:                        f.simulation_metadata.year,
        }
    }
}

/// Read and validate `config.json`.
pub fn load_config(path: &Path) -> LoadResult<DispatchConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_owned(), source })?;
    parse_config(&text)
}

/// Like [`load_config`] but parses an in-memory JSON document.
pub fn parse_config(json: &str) -> LoadResult<DispatchConfig> {
    let file: ConfigFile = serde_json::from_str(json)?;
    let config = DispatchConfig::from(file);
    config.validate()?;
    tracing::debug!(year = config.year, truck_tons = config.truck_capacity_tons, "loaded config");
    Ok(config)
}
