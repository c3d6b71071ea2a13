//! annual — one full year of biosolid dispatch, end to end.
//!
//! ```text
//! annual <data_dir> [out_dir]              # load a data directory
//! annual --synthetic [seed] [out_dir]      # generate a seeded data set
//! ```
//!
//! Writes `solution.csv`, `daily_summary.csv` and `summary_metrics.json` to
//! `out_dir` (default `output/annual`), then reads the solution back and
//! reconciles it independently of the engine.  Set `RUST_LOG=debug` for
//! per-day overflow events.

mod synthetic;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate};

use bd_core::PlantId;
use bd_dispatch::{
    CandidateScore, DaySummary, DeliveryEvent, DispatchObserver, EngineBuilder, EngineTotals, Scenario,
    StorageLedger,
};
use bd_io::{CsvWriter, DispatchOutputObserver, OutputWriter, load_scenario, read_solution, write_scoreboard_json};
use bd_metrics::{MetricsReconciler, SupplyBalance, cross_check};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_SEED:    u64  = 42;
const DEFAULT_OUT_DIR: &str = "output/annual";
/// Relative tolerance when comparing engine and reconciler totals.
const CHECK_TOLERANCE: f64  = 1e-9;

// ── Command line ──────────────────────────────────────────────────────────────

enum Source {
    Directory(PathBuf),
    Synthetic(u64),
}

fn parse_args() -> Result<(Source, PathBuf)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (source, rest) = match args.as_slice() {
        [flag, rest @ ..] if flag == "--synthetic" => match rest {
            [seed, tail @ ..] if seed.parse::<u64>().is_ok() => (Source::Synthetic(seed.parse()?), tail),
            _ => (Source::Synthetic(DEFAULT_SEED), rest),
        },
        [dir, rest @ ..] if !dir.starts_with("--") => (Source::Directory(PathBuf::from(dir)), rest),
        _ => bail!("usage: annual <data_dir> [out_dir] | annual --synthetic [seed] [out_dir]"),
    };
    let out_dir = match rest {
        [] => PathBuf::from(DEFAULT_OUT_DIR),
        [dir] => PathBuf::from(dir),
        _ => bail!("unexpected arguments: {}", rest.join(" ")),
    };
    Ok((source, out_dir))
}

// ── Observer wrapper: monthly roll-up ─────────────────────────────────────────

#[derive(Default, Clone, Copy)]
struct MonthStats {
    trucks:        usize,
    tons:          f64,
    dumped:        f64,
    locked_farm_days: usize,
}

struct MonthlyObserver<O: DispatchObserver> {
    inner:  O,
    months: [MonthStats; 12],
}

impl<O: DispatchObserver> MonthlyObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, months: [MonthStats::default(); 12] }
    }

    fn month(&mut self, date: NaiveDate) -> &mut MonthStats {
        &mut self.months[date.month0() as usize]
    }
}

impl<O: DispatchObserver> DispatchObserver for MonthlyObserver<O> {
    fn on_day_start(&mut self, date: NaiveDate, valid_farms: usize) {
        self.inner.on_day_start(date, valid_farms);
    }

    fn on_dispatch(&mut self, event: &DeliveryEvent, score: &CandidateScore) {
        let m = self.month(event.date);
        m.trucks += 1;
        m.tons += event.tons;
        self.inner.on_dispatch(event, score);
    }

    fn on_overflow(&mut self, date: NaiveDate, plant: PlantId, dumped_tons: f64) {
        self.month(date).dumped += dumped_tons;
        self.inner.on_overflow(date, plant, dumped_tons);
    }

    fn on_day_end(&mut self, summary: &DaySummary, ledger: &StorageLedger) {
        self.month(summary.date).locked_farm_days += summary.locked_farms;
        self.inner.on_day_end(summary, ledger);
    }

    fn on_run_end(&mut self, totals: &EngineTotals) {
        self.inner.on_run_end(totals);
    }
}

// ── Output backend ────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &Path) -> Result<impl OutputWriter> {
    Ok(CsvWriter::new(dir)?)
}

/// CSV and SQLite side by side.
#[cfg(feature = "sqlite")]
struct Both(CsvWriter, bd_io::SqliteWriter);

#[cfg(feature = "sqlite")]
impl OutputWriter for Both {
    fn write_deliveries(&mut self, rows: &[bd_io::DeliveryRow]) -> bd_io::OutputResult<()> {
        self.0.write_deliveries(rows)?;
        self.1.write_deliveries(rows)
    }

    fn write_day_summary(&mut self, row: &bd_io::DaySummaryRow) -> bd_io::OutputResult<()> {
        self.0.write_day_summary(row)?;
        self.1.write_day_summary(row)
    }

    fn finish(&mut self) -> bd_io::OutputResult<()> {
        self.0.finish()?;
        self.1.finish()
    }
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &Path) -> Result<impl OutputWriter> {
    Ok(Both(CsvWriter::new(dir)?, bd_io::SqliteWriter::new(dir)?))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (source, out_dir) = parse_args()?;

    // 1. Inputs.
    let scenario: Scenario = match &source {
        Source::Directory(dir) => {
            println!("=== annual — data directory {} ===", dir.display());
            load_scenario(dir)?
        }
        Source::Synthetic(seed) => {
            println!("=== annual — synthetic data, seed {seed} ===");
            synthetic::build(*seed)?
        }
    };
    println!(
        "Year {}  |  Plants: {}  |  Farms: {}  |  Zones: {}",
        scenario.year().year(),
        scenario.plants.len(),
        scenario.farms.len(),
        scenario.farms.zone_count(),
    );
    println!();

    // 2. Feasibility.
    let balance = SupplyBalance::compute(&scenario.plants, &scenario.demand, &scenario.config)?;
    println!("{balance}");
    println!();

    // 3. Dispatch.
    std::fs::create_dir_all(&out_dir)?;
    let inner = DispatchOutputObserver::new(open_writer(&out_dir)?, &scenario);
    let mut obs = MonthlyObserver::new(inner);

    let t0 = Instant::now();
    let run = EngineBuilder::new(&scenario).build()?.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        bail!("output error: {e}");
    }
    println!("Dispatch complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  {} trucks, {:.1} t delivered, {:.1} t dumped",
        run.totals.dispatches, run.totals.delivered_tons, run.totals.dumped_tons
    );
    println!();

    println!("{:<6} {:>7} {:>10} {:>10} {:>14}", "Month", "Trucks", "Tons", "Dumped", "Locked f-days");
    println!("{}", "-".repeat(51));
    for (i, m) in obs.months.iter().enumerate() {
        println!(
            "{:<6} {:>7} {:>10.1} {:>10.1} {:>14}",
            i + 1,
            m.trucks,
            m.tons,
            m.dumped,
            m.locked_farm_days
        );
    }
    println!();

    // 4. Reconcile from the file on disk, not from memory.
    let solution = read_solution(&out_dir.join("solution.csv"), &scenario.plants, &scenario.farms)?;
    let board = MetricsReconciler::new(&scenario).reconcile(&solution)?;

    let discrepancies = cross_check(&board, &run.totals, CHECK_TOLERANCE);
    for d in &discrepancies {
        tracing::warn!(%d, "engine and reconciler disagree");
    }
    if discrepancies.is_empty() {
        println!("Reconciliation: engine totals confirmed");
    }
    println!(
        "Engine-side estimate {:.2} vs reconciled score {:.2}",
        run.totals.net_score(),
        board.scoreboard.net_carbon_credit_score
    );

    let report = board.rounded();
    let report_path = out_dir.join("summary_metrics.json");
    write_scoreboard_json(&report_path, &report)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("Wrote {}", report_path.display());

    Ok(())
}
