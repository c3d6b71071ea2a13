//! CSV input loaders.
//!
//! # Files
//!
//! | File                        | Shape                                          |
//! |-----------------------------|------------------------------------------------|
//! | `stp_registry.csv`          | `stp_id,lat,lon,daily_output_tons,storage_max_tons` |
//! | `farm_locations.csv`        | `farm_id,lat,lon,zone`                         |
//! | `daily_weather_<year>.csv`  | `date` then one rainfall column (mm) per zone  |
//! | `daily_n_demand.csv`        | `date` then one demand column (kg N) per farm  |
//!
//! Extra columns in the two registries are ignored.  In the wide tables an
//! empty cell reads as zero; any other non-numeric cell is an error.  Demand
//! columns for farms that are not in the registry are skipped with a warning,
//! and registered farms without a column have zero demand every day.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use bd_core::{FarmRegistry, GeoPoint, Plant, PlantRegistry};
use bd_dispatch::{DemandTable, Scenario};
use bd_index::RainfallTable;

use crate::config::load_config;
use crate::{LoadError, LoadResult};

pub const CONFIG_FILE: &str = "config.json";
pub const PLANTS_FILE: &str = "stp_registry.csv";
pub const FARMS_FILE: &str = "farm_locations.csv";
pub const DEMAND_FILE: &str = "daily_n_demand.csv";

/// Rainfall file name for `year`.
pub fn weather_file(year: i32) -> String {
    format!("daily_weather_{year}.csv")
}

const DATE_FORMAT: &str = "%Y-%m-%d";

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StpRecord {
    stp_id:            String,
    lat:               f64,
    lon:               f64,
    daily_output_tons: f64,
    storage_max_tons:  f64,
}

#[derive(Deserialize)]
struct FarmRecord {
    farm_id: String,
    lat:     f64,
    lon:     f64,
    zone:    String,
}

// ── Whole data directory ──────────────────────────────────────────────────────

/// Load every input in `dir` and build the indices.
pub fn load_scenario(dir: &Path) -> LoadResult<Scenario> {
    let config = load_config(&dir.join(CONFIG_FILE))?;
    let plants = load_plants(&dir.join(PLANTS_FILE))?;
    let farms = load_farms(&dir.join(FARMS_FILE))?;
    let rainfall = load_rainfall(&dir.join(weather_file(config.year)))?;
    let demand = load_demand(&dir.join(DEMAND_FILE), &farms)?;

    tracing::info!(
        plants = plants.len(),
        farms = farms.len(),
        zones = farms.zone_count(),
        weather_days = rainfall.len(),
        demand_days = demand.days(),
        "loaded input data"
    );
    Ok(Scenario::new(config, plants, farms, &rainfall, demand)?)
}

// ── Registries ────────────────────────────────────────────────────────────────

pub fn load_plants(path: &Path) -> LoadResult<PlantRegistry> {
    load_plants_reader(open(path)?)
}

/// Like [`load_plants`] but accepts any `Read` source.
pub fn load_plants_reader<R: Read>(reader: R) -> LoadResult<PlantRegistry> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut plants = PlantRegistry::new();
    for result in rdr.deserialize::<StpRecord>() {
        let r = result?;
        plants.push(Plant {
            name:              r.stp_id,
            location:          GeoPoint::new(r.lat, r.lon),
            daily_output_tons: r.daily_output_tons,
            storage_max_tons:  r.storage_max_tons,
        })?;
    }
    Ok(plants)
}

pub fn load_farms(path: &Path) -> LoadResult<FarmRegistry> {
    load_farms_reader(open(path)?)
}

/// Like [`load_farms`] but accepts any `Read` source.
pub fn load_farms_reader<R: Read>(reader: R) -> LoadResult<FarmRegistry> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut farms = FarmRegistry::new();
    for result in rdr.deserialize::<FarmRecord>() {
        let r = result?;
        farms.push(&r.farm_id, GeoPoint::new(r.lat, r.lon), r.zone.trim())?;
    }
    Ok(farms)
}

// ── Wide daily tables ─────────────────────────────────────────────────────────

pub fn load_rainfall(path: &Path) -> LoadResult<RainfallTable> {
    load_rainfall_reader(open(path)?)
}

/// Like [`load_rainfall`] but accepts any `Read` source.
pub fn load_rainfall_reader<R: Read>(reader: R) -> LoadResult<RainfallTable> {
    let (zones, rows) = read_wide(reader, "weather")?;
    Ok(RainfallTable::new(zones, rows)?)
}

pub fn load_demand(path: &Path, farms: &FarmRegistry) -> LoadResult<DemandTable> {
    load_demand_reader(open(path)?, farms)
}

/// Like [`load_demand`] but accepts any `Read` source.
pub fn load_demand_reader<R: Read>(reader: R, farms: &FarmRegistry) -> LoadResult<DemandTable> {
    let (columns, rows) = read_wide(reader, "demand")?;

    let targets: Vec<Option<usize>> = columns
        .iter()
        .map(|name| {
            let id = farms.lookup(name);
            if id.is_none() {
                tracing::warn!(column = name.as_str(), "demand column for unregistered farm skipped");
            }
            id.map(|f| f.index())
        })
        .collect();

    let mut table = DemandTable::new(farms.len());
    for (date, values) in rows {
        let mut day = vec![0.0; farms.len()];
        for (target, kg) in targets.iter().zip(values) {
            if let Some(i) = *target {
                day[i] = kg;
            }
        }
        table.insert_day(date, day)?;
    }
    Ok(table)
}

/// Parse a `date,<col>,<col>,…` table into its column names and numeric rows.
fn read_wide<R: Read>(
    reader: R,
    file:   &'static str,
) -> LoadResult<(Vec<String>, Vec<(NaiveDate, Vec<f64>)>)> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();
    let date_col = headers
        .iter()
        .position(|h| h.trim() == "date")
        .ok_or(LoadError::MissingColumn { file, column: "date" })?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != date_col)
        .map(|(_, h)| h.trim().to_owned())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let raw_date = record.get(date_col).unwrap_or_default().trim();
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|e| LoadError::Parse {
            file,
            message: format!("line {line}: bad date {raw_date:?}: {e}"),
        })?;

        let values = record
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != date_col)
            .map(|(i, cell)| parse_cell(cell).ok_or_else(|| LoadError::Parse {
                file,
                message: format!("line {line}, column {:?}: not a number: {cell:?}", &headers[i]),
            }))
            .collect::<LoadResult<Vec<f64>>>()?;
        rows.push((date, values));
    }
    Ok((columns, rows))
}

fn parse_cell(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(0.0);
    }
    cell.parse::<f64>().ok()
}

fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|source| LoadError::Io { path: path.to_owned(), source })
}
