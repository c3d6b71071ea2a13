//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DaySummaryRow, DeliveryRow, OutputResult};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`DispatchOutputObserver::take_error`][crate::DispatchOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one day's deliveries, in dispatch order.
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> OutputResult<()>;

    /// Write one day summary row.
    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
