//! Cross-checking the reconciled scoreboard against the engine's own totals.
//!
//! Only the figures both sides compute the same way are compared: delivered
//! tons, transport emissions and the overflow penalty.  Offset, sequestration
//! and leaching are expected to differ because the engine scores truck by
//! truck against a shrinking residual while the reconciler scores each
//! farm's daily total against the original demand.

use std::fmt;

use bd_dispatch::EngineTotals;

use crate::Scoreboard;

/// A figure compared by [`cross_check`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CheckedFigure {
    DeliveredTons,
    TransportEmissions,
    OverflowPenalty,
}

impl fmt::Display for CheckedFigure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DeliveredTons      => "delivered tons",
            Self::TransportEmissions => "transport emissions",
            Self::OverflowPenalty    => "overflow penalty",
        })
    }
}

/// One figure on which the engine and the reconciler disagree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Discrepancy {
    pub figure:     CheckedFigure,
    pub engine:     f64,
    pub reconciled: f64,
}

impl Discrepancy {
    pub fn delta(&self) -> f64 {
        self.reconciled - self.engine
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: engine {:.3}, reconciled {:.3} (Δ {:+.3})",
            self.figure,
            self.engine,
            self.reconciled,
            self.delta()
        )
    }
}

/// Compare `board` with `totals`.  `tolerance` is relative to the larger
/// magnitude, floored at an absolute scale of 1.
///
/// Returns an empty list when everything agrees.
pub fn cross_check(board: &Scoreboard, totals: &EngineTotals, tolerance: f64) -> Vec<Discrepancy> {
    [
        (CheckedFigure::DeliveredTons, totals.delivered_tons, board.details.total_delivered_tons),
        (CheckedFigure::TransportEmissions, totals.transport_emission, board.penalties.transport_emissions),
        (CheckedFigure::OverflowPenalty, totals.overflow_penalty, board.penalties.stp_overflow),
    ]
    .into_iter()
    .filter(|&(_, engine, reconciled)| {
        let scale = engine.abs().max(reconciled.abs()).max(1.0);
        (engine - reconciled).abs() > tolerance * scale
    })
    .map(|(figure, engine, reconciled)| Discrepancy { figure, engine, reconciled })
    .collect()
}
