//! The `Scoreboard` record and its report rounding.
//!
//! Field names are the JSON keys of `summary_metrics.json`, so the struct
//! serializes straight to the report shape:
//!
//! ```text
//! { "scoreboard": { net_carbon_credit_score, nitrogen_precision,
//!                   logistics_efficiency, rain_lock_resilience },
//!   "details":    { total_delivered_tons, total_demand_n_kg,
//!                   total_delivered_n_kg, total_round_trip_km },
//!   "gains":      { synthetic_fertilizer_offset, soil_carbon_sequestration },
//!   "penalties":  { transport_emissions, nitrogen_leaching, stp_overflow } }
//! ```

use serde::{Deserialize, Serialize};

/// The four headline ratios.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// `(offset + sequestration) − (transport + leaching + overflow)`, kg CO2.
    pub net_carbon_credit_score: f64,
    /// Delivered N over annual demand N.
    pub nitrogen_precision:      f64,
    /// Delivered tons per round-trip kilometre.
    pub logistics_efficiency:    f64,
    /// Share of delivered tons that moved in June–September.
    pub rain_lock_resilience:    f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub total_delivered_tons: f64,
    pub total_demand_n_kg:    f64,
    pub total_delivered_n_kg: f64,
    pub total_round_trip_km:  f64,
}

/// Credits, kg CO2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    pub synthetic_fertilizer_offset: f64,
    pub soil_carbon_sequestration:   f64,
}

impl Gains {
    pub fn total(&self) -> f64 {
        self.synthetic_fertilizer_offset + self.soil_carbon_sequestration
    }
}

/// Costs, kg CO2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Penalties {
    pub transport_emissions: f64,
    pub nitrogen_leaching:   f64,
    pub stp_overflow:        f64,
}

impl Penalties {
    pub fn total(&self) -> f64 {
        self.transport_emissions + self.nitrogen_leaching + self.stp_overflow
    }
}

/// The reconciled result of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub scoreboard: KeyMetrics,
    pub details:    Details,
    pub gains:      Gains,
    pub penalties:  Penalties,
}

impl Scoreboard {
    /// Assemble the headline ratios from the component totals.
    ///
    /// A ratio whose denominator is zero is reported as zero.
    pub fn from_components(details: Details, gains: Gains, penalties: Penalties, monsoon_tons: f64) -> Self {
        let scoreboard = KeyMetrics {
            net_carbon_credit_score: gains.total() - penalties.total(),
            nitrogen_precision:      ratio(details.total_delivered_n_kg, details.total_demand_n_kg),
            logistics_efficiency:    ratio(details.total_delivered_tons, details.total_round_trip_km),
            rain_lock_resilience:    ratio(monsoon_tons, details.total_delivered_tons),
        };
        Self { scoreboard, details, gains, penalties }
    }

    /// Copy with the headline block rounded for reporting: the score to two
    /// decimals, the ratios to four.  Component totals are left exact.
    pub fn rounded(&self) -> Self {
        let k = &self.scoreboard;
        Self {
            scoreboard: KeyMetrics {
                net_carbon_credit_score: round_to(k.net_carbon_credit_score, 2),
                nitrogen_precision:      round_to(k.nitrogen_precision, 4),
                logistics_efficiency:    round_to(k.logistics_efficiency, 4),
                rain_lock_resilience:    round_to(k.rain_lock_resilience, 4),
            },
            ..*self
        }
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 { num / den } else { 0.0 }
}

fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}
