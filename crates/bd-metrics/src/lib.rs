//! `bd-metrics` — independent scoring of a delivery log.
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`reconciler`] | `MetricsReconciler` — day-by-day replay of a log      |
//! | [`scoreboard`] | `Scoreboard` and its report sections                  |
//! | [`check`]      | `cross_check` against the engine's `EngineTotals`     |
//! | [`supply`]     | `SupplyBalance` — annual supply vs demand             |
//!
//! The reconciler reads nothing but the [`Scenario`][bd_dispatch::Scenario]
//! and the [`Solution`][bd_dispatch::Solution], so a log loaded from disk
//! scores exactly like one fresh from the engine.

pub mod check;
pub mod error;
pub mod reconciler;
pub mod scoreboard;
pub mod supply;

#[cfg(test)]
mod tests;

pub use check::{CheckedFigure, Discrepancy, cross_check};
pub use error::{MetricsError, MetricsResult};
pub use reconciler::MetricsReconciler;
pub use scoreboard::{Details, Gains, KeyMetrics, Penalties, Scoreboard};
pub use supply::SupplyBalance;
