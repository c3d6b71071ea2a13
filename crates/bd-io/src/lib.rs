//! `bd-io` — files in and out of the biosolid dispatch planner.
//!
//! # Inputs
//!
//! [`load_scenario`] reads a data directory (`config.json`,
//! `stp_registry.csv`, `farm_locations.csv`, `daily_weather_<year>.csv`,
//! `daily_n_demand.csv`) into a ready [`Scenario`][bd_dispatch::Scenario].
//! Every loader also has a `_reader` form for in-memory sources.
//!
//! # Outputs
//!
//! | Feature   | Backend | Files created                          |
//! |-----------|---------|----------------------------------------|
//! | *(none)*  | CSV     | `solution.csv`, `daily_summary.csv`    |
//! | `sqlite`  | SQLite  | `output.db`                            |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`DispatchOutputObserver`], which implements
//! `bd_dispatch::DispatchObserver`.  The reconciled scoreboard goes to
//! `summary_metrics.json` via [`write_scoreboard_json`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use bd_io::{CsvWriter, DispatchOutputObserver, load_scenario};
//!
//! let scenario = load_scenario(Path::new("./datasets"))?;
//! let mut obs = DispatchOutputObserver::new(CsvWriter::new(out_dir)?, &scenario);
//! let run = EngineBuilder::new(&scenario).build()?.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod config;
pub mod csv;
pub mod error;
pub mod loader;
pub mod observer;
pub mod report;
pub mod row;
pub mod solution;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use config::{load_config, parse_config};
pub use crate::csv::CsvWriter;
pub use error::{LoadError, LoadResult, OutputError, OutputResult};
pub use loader::{load_demand, load_farms, load_plants, load_rainfall, load_scenario};
pub use observer::DispatchOutputObserver;
pub use report::write_scoreboard_json;
pub use row::{DaySummaryRow, DeliveryRow};
pub use solution::{read_solution, write_solution};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
