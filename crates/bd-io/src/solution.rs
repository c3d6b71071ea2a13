//! `solution.csv` — the delivery log on disk.
//!
//! ```csv
//! date,stp_id,farm_id,tons_delivered
//! 2025-01-01,STP_03,F_1042,10.0
//! 2025-01-01,STP_03,F_1007,10.0
//! ```
//!
//! Rows keep dispatch order.  Reading resolves the external ids back to
//! dense ids through the registries; an id that is not registered is an
//! error.

use std::io::{Read, Write};
use std::path::Path;

use bd_core::{FarmRegistry, PlantRegistry};
use bd_dispatch::{DeliveryEvent, Solution};

use crate::row::DeliveryRow;
use crate::{LoadError, LoadResult, OutputResult};

pub const SOLUTION_FILE: &str = "solution.csv";
pub(crate) const SOLUTION_HEADER: [&str; 4] = ["date", "stp_id", "farm_id", "tons_delivered"];

/// Write a whole solution to `path`.
pub fn write_solution(
    path:     &Path,
    solution: &Solution,
    plants:   &PlantRegistry,
    farms:    &FarmRegistry,
) -> OutputResult<()> {
    let file = std::fs::File::create(path)?;
    write_solution_writer(file, solution, plants, farms)
}

/// Like [`write_solution`] but accepts any `Write` sink.
pub fn write_solution_writer<W: Write>(
    writer:   W,
    solution: &Solution,
    plants:   &PlantRegistry,
    farms:    &FarmRegistry,
) -> OutputResult<()> {
    let mut wtr = headerless(writer);
    wtr.write_record(SOLUTION_HEADER)?;
    for event in solution {
        wtr.serialize(DeliveryRow::from_event(event, plants, farms))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read a solution log.
///
/// # Errors
/// [`LoadError::MissingSolution`] if `path` does not exist; the log is never
/// reconstructed implicitly.
pub fn read_solution(path: &Path, plants: &PlantRegistry, farms: &FarmRegistry) -> LoadResult<Solution> {
    if !path.exists() {
        return Err(LoadError::MissingSolution(path.to_owned()));
    }
    let file = std::fs::File::open(path)
        .map_err(|source| LoadError::Io { path: path.to_owned(), source })?;
    let solution = read_solution_reader(file, plants, farms)?;
    tracing::debug!(path = %path.display(), events = solution.len(), "read solution log");
    Ok(solution)
}

/// Like [`read_solution`] but accepts any `Read` source.
pub fn read_solution_reader<R: Read>(
    reader: R,
    plants: &PlantRegistry,
    farms:  &FarmRegistry,
) -> LoadResult<Solution> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut solution = Solution::new();
    for result in rdr.deserialize::<DeliveryRow>() {
        let row = result?;
        let plant = plants.lookup(row.stp_id.trim()).ok_or_else(|| LoadError::UnknownId {
            file: SOLUTION_FILE,
            kind: "plant",
            name: row.stp_id.clone(),
        })?;
        let farm = farms.lookup(row.farm_id.trim()).ok_or_else(|| LoadError::UnknownId {
            file: SOLUTION_FILE,
            kind: "farm",
            name: row.farm_id.clone(),
        })?;
        solution.push(DeliveryEvent { date: row.date, plant, farm, tons: row.tons_delivered });
    }
    Ok(solution)
}

/// A CSV writer that leaves the header to the caller, so empty files still
/// carry one.
pub(crate) fn headerless<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(writer)
}
