//! The read-only economic and environmental constants of a run.
//!
//! `DispatchConfig` is loaded once (see `bd-io`) and passed by reference to
//! the index builders, the dispatch engine and the reconciler.  Nothing
//! mutates it after [`DispatchConfig::validate`] has accepted it.
//!
//! All rates are expressed in kg CO2-equivalent:
//!
//! | Field                              | Unit                        |
//! |------------------------------------|-----------------------------|
//! | `synthetic_offset_credit`          | per kg nitrogen absorbed    |
//! | `sequestration_credit`             | per kg biosolid applied     |
//! | `transport_emission_per_km`        | per km driven               |
//! | `overflow_penalty_per_ton`         | per ton dumped at a plant   |
//! | `leaching_penalty_per_kg_n`        | per kg excess nitrogen      |

use crate::{CoreError, CoreResult, SimYear};

/// Delivered nitrogen up to this multiple of demand is not charged as
/// leaching.
pub const DEMAND_BUFFER_FACTOR: f64 = 1.1;

/// Kilograms per metric ton.
pub const KG_PER_TON: f64 = 1_000.0;

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchConfig {
    /// Maximum load of one truck (tons).  Every delivery is at most this.
    pub truck_capacity_tons: f64,

    /// Nitrogen carried by one ton of biosolid (kg N / ton).
    pub nitrogen_content_kg_per_ton: f64,

    pub synthetic_offset_credit: f64,

    pub sequestration_credit: f64,

    pub transport_emission_per_km: f64,

    pub overflow_penalty_per_ton: f64,

    pub leaching_penalty_per_kg_n: f64,

    /// A zone is locked when forward rainfall exceeds this (mm).
    pub rain_lock_threshold_mm: f64,

    /// Forward rainfall window, including the current day.
    pub rain_lock_window_days: usize,

    /// Calendar year to simulate.
    pub year: i32,
}

impl DispatchConfig {
    /// Check every constant.  A run must not start with a config that fails
    /// this.
    pub fn validate(&self) -> CoreResult<()> {
        positive("truck_capacity_tons", self.truck_capacity_tons)?;
        positive("nitrogen_content_kg_per_ton", self.nitrogen_content_kg_per_ton)?;
        non_negative("synthetic_offset_credit", self.synthetic_offset_credit)?;
        non_negative("sequestration_credit", self.sequestration_credit)?;
        non_negative("transport_emission_per_km", self.transport_emission_per_km)?;
        non_negative("overflow_penalty_per_ton", self.overflow_penalty_per_ton)?;
        non_negative("leaching_penalty_per_kg_n", self.leaching_penalty_per_kg_n)?;
        non_negative("rain_lock_threshold_mm", self.rain_lock_threshold_mm)?;
        if self.rain_lock_window_days == 0 {
            return Err(CoreError::Config(
                "rain_lock_window_days must be at least 1".into(),
            ));
        }
        SimYear::new(self.year)?;
        Ok(())
    }

    /// The calendar for `year`.
    pub fn sim_year(&self) -> CoreResult<SimYear> {
        SimYear::new(self.year)
    }

    /// Nitrogen (kg) carried by `tons` of biosolid.
    #[inline]
    pub fn package_nitrogen(&self, tons: f64) -> f64 {
        tons * self.nitrogen_content_kg_per_ton
    }

    /// Soil-carbon credit for applying `tons` of biosolid.
    #[inline]
    pub fn sequestration_gain(&self, tons: f64) -> f64 {
        tons * KG_PER_TON * self.sequestration_credit
    }

    /// Synthetic-fertiliser offset for `useful_n_kg` of absorbed nitrogen.
    #[inline]
    pub fn offset_gain(&self, useful_n_kg: f64) -> f64 {
        useful_n_kg * self.synthetic_offset_credit
    }

    #[inline]
    pub fn transport_emission(&self, km: f64) -> f64 {
        km * self.transport_emission_per_km
    }

    #[inline]
    pub fn leaching_penalty(&self, excess_n_kg: f64) -> f64 {
        excess_n_kg * self.leaching_penalty_per_kg_n
    }

    #[inline]
    pub fn overflow_penalty(&self, excess_tons: f64) -> f64 {
        excess_tons * self.overflow_penalty_per_ton
    }
}

/// Nitrogen split of a delivery against a demand ceiling.
///
/// Returns `(useful_n, excess_n)`: useful nitrogen is capped at the demand,
/// excess is whatever exceeds the buffered demand.
#[inline]
pub fn nitrogen_split(delivered_n_kg: f64, demand_n_kg: f64) -> (f64, f64) {
    let useful = delivered_n_kg.min(demand_n_kg);
    let excess = (delivered_n_kg - demand_n_kg * DEMAND_BUFFER_FACTOR).max(0.0);
    (useful, excess)
}

fn positive(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be a positive number, got {value}")))
    }
}

fn non_negative(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be a non-negative number, got {value}")))
    }
}
