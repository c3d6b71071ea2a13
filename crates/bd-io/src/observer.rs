//! `DispatchOutputObserver<W>` — bridges `DispatchObserver` to an `OutputWriter`.

use bd_core::{FarmRegistry, PlantRegistry};
use bd_dispatch::{CandidateScore, DaySummary, DeliveryEvent, DispatchObserver, EngineTotals, Scenario, StorageLedger};

use crate::row::{DaySummaryRow, DeliveryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`DispatchObserver`] that writes the delivery log and day summaries to
/// any [`OutputWriter`] backend (CSV, SQLite).
///
/// Deliveries are buffered per day and handed to the writer at day end.
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `engine.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct DispatchOutputObserver<'a, W: OutputWriter> {
    writer:     W,
    plants:     &'a PlantRegistry,
    farms:      &'a FarmRegistry,
    pending:    Vec<DeliveryRow>,
    last_error: Option<OutputError>,
}

impl<'a, W: OutputWriter> DispatchOutputObserver<'a, W> {
    /// Create an observer backed by `writer`, naming plants and farms from
    /// `scenario`'s registries.
    pub fn new(writer: W, scenario: &'a Scenario) -> Self {
        Self {
            writer,
            plants:     &scenario.plants,
            farms:      &scenario.farms,
            pending:    Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `engine.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::error!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> DispatchObserver for DispatchOutputObserver<'_, W> {
    fn on_dispatch(&mut self, event: &DeliveryEvent, _score: &CandidateScore) {
        self.pending.push(DeliveryRow::from_event(event, self.plants, self.farms));
    }

    fn on_day_end(&mut self, summary: &DaySummary, _ledger: &StorageLedger) {
        if !self.pending.is_empty() {
            let result = self.writer.write_deliveries(&self.pending);
            self.pending.clear();
            self.store_err(result);
        }
        let result = self.writer.write_day_summary(&DaySummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_run_end(&mut self, _totals: &EngineTotals) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
