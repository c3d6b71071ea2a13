//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `solution.csv` (the delivery log, readable by
//!   [`read_solution`][crate::read_solution])
//! - `daily_summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::solution::{SOLUTION_FILE, SOLUTION_HEADER, headerless};
use crate::row::DAY_SUMMARY_HEADER;
use crate::writer::OutputWriter;
use crate::{DaySummaryRow, DeliveryRow, OutputResult};

pub const DAY_SUMMARY_FILE: &str = "daily_summary.csv";

/// `solution.csv` and `daily_summary.csv` side by side.  Both carry a header
/// even when no row follows.
pub struct CsvWriter {
    deliveries: Writer<File>,
    summaries:  Writer<File>,
}

impl CsvWriter {
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut deliveries = headerless(File::create(dir.join(SOLUTION_FILE))?);
        deliveries.write_record(SOLUTION_HEADER)?;
        let mut summaries = headerless(File::create(dir.join(DAY_SUMMARY_FILE))?);
        summaries.write_record(DAY_SUMMARY_HEADER)?;
        Ok(Self { deliveries, summaries })
    }
}

impl OutputWriter for CsvWriter {
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> OutputResult<()> {
        rows.iter().try_for_each(|row| self.deliveries.serialize(row))?;
        Ok(())
    }

    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()> {
        self.summaries.serialize(row)?;
        Ok(())
    }

    /// Flush both files; safe to repeat.
    fn finish(&mut self) -> OutputResult<()> {
        self.deliveries.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
