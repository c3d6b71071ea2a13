//! `summary_metrics.json` — the reconciled scoreboard on disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use bd_metrics::Scoreboard;

use crate::OutputResult;

pub const SCOREBOARD_FILE: &str = "summary_metrics.json";

/// Write `board` as pretty-printed JSON.
///
/// The board is written as given; call
/// [`Scoreboard::rounded`][bd_metrics::Scoreboard::rounded] first for the
/// report rounding.
pub fn write_scoreboard_json(path: &Path, board: &Scoreboard) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, board)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
