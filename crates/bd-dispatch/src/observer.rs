//! Engine observer trait for progress reporting and data collection.

use chrono::NaiveDate;

use bd_core::PlantId;

use crate::{CandidateScore, DaySummary, DeliveryEvent, EngineTotals, StorageLedger};

/// Callbacks invoked by [`DispatchEngine`][crate::DispatchEngine] at key
/// points in the day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — monsoon progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl DispatchObserver for Progress {
///     fn on_day_end(&mut self, summary: &DaySummary, _ledger: &StorageLedger) {
///         if summary.date.day() == 1 {
///             println!("{}: {} trucks", summary.date, summary.dispatches);
///         }
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called after replenishment, before any plant is dispatched.
    fn on_day_start(&mut self, _date: NaiveDate, _valid_farms: usize) {}

    /// Called once per truckload, with the candidate score that selected it.
    fn on_dispatch(&mut self, _event: &DeliveryEvent, _score: &CandidateScore) {}

    /// Called for each plant whose excess was dumped at day end.
    fn on_overflow(&mut self, _date: NaiveDate, _plant: PlantId, _dumped_tons: f64) {}

    /// Called after the overflow clamp with the closing ledger.
    fn on_day_end(&mut self, _summary: &DaySummary, _ledger: &StorageLedger) {}

    /// Called once after the last day of the year.
    fn on_run_end(&mut self, _totals: &EngineTotals) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
