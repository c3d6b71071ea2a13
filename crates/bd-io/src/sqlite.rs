//! SQLite output backend (feature `sqlite`).
//!
//! `output.db` holds two tables keyed by date:
//!
//! ```text
//! deliveries(date, seq, stp_id, farm_id, tons_delivered)   -- seq = dispatch order within the day
//! daily_summaries(date, valid_farms, locked_farms, …)
//! ```
//!
//! A day's deliveries and its summary row are committed together, so a
//! database cut short by an error never holds half a day.  Opening the
//! writer replaces any tables left by an earlier run.

use std::path::Path;

use rusqlite::{Connection, params};

use crate::writer::OutputWriter;
use crate::{DaySummaryRow, DeliveryRow, OutputResult};

pub const DATABASE_FILE: &str = "output.db";

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    DROP TABLE IF EXISTS deliveries;
    DROP TABLE IF EXISTS daily_summaries;
    CREATE TABLE deliveries (
        date           TEXT    NOT NULL,
        seq            INTEGER NOT NULL,
        stp_id         TEXT    NOT NULL,
        farm_id        TEXT    NOT NULL,
        tons_delivered REAL    NOT NULL,
        PRIMARY KEY (date, seq)
    );
    CREATE TABLE daily_summaries (
        date              TEXT    PRIMARY KEY,
        valid_farms       INTEGER NOT NULL,
        locked_farms      INTEGER NOT NULL,
        dispatches        INTEGER NOT NULL,
        tons_shipped      REAL    NOT NULL,
        dumped_tons       REAL    NOT NULL,
        overflow_penalty  REAL    NOT NULL,
        closing_inventory REAL    NOT NULL
    );";

/// Writes the delivery log and day summaries to an SQLite database.
pub struct SqliteWriter {
    conn:    Connection,
    /// Deliveries of the day not yet committed.
    staged:  Vec<DeliveryRow>,
    flushed: bool,
}

impl SqliteWriter {
    /// Create `output.db` in `dir` with empty tables.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DATABASE_FILE))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, staged: Vec::new(), flushed: false })
    }

    fn commit_day(&mut self, summary: &DaySummaryRow) -> OutputResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut insert = tx.prepare_cached(
                "INSERT INTO deliveries (date, seq, stp_id, farm_id, tons_delivered) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (seq, row) in self.staged.iter().enumerate() {
                insert.execute(params![
                    row.date.to_string(),
                    seq as i64,
                    row.stp_id,
                    row.farm_id,
                    row.tons_delivered,
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO daily_summaries VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                summary.date.to_string(),
                summary.valid_farms,
                summary.locked_farms,
                summary.dispatches,
                summary.tons_shipped,
                summary.dumped_tons,
                summary.overflow_penalty,
                summary.closing_inventory,
            ],
        )?;
        tx.commit()?;
        self.staged.clear();
        Ok(())
    }
}

impl OutputWriter for SqliteWriter {
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> OutputResult<()> {
        self.staged.extend_from_slice(rows);
        Ok(())
    }

    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()> {
        self.commit_day(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        if !self.flushed {
            self.flushed = true;
            self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        }
        Ok(())
    }
}
