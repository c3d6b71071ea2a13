//! Truckload scoring.
//!
//! For a package of `tons` (already capped at truck capacity) sent to a farm
//! with `residual_kg` of unmet demand:
//!
//! ```text
//! package_n  = tons × nitrogen_content
//! useful_n   = min(package_n, residual)
//! excess_n   = max(0, package_n − 1.1 × residual)
//! credit     = useful_n × offset_rate + tons × 1000 × sequestration_rate
//! transport  = one_way_km × emission_factor
//! leaching   = excess_n × leaching_rate
//! score      = credit − transport − leaching
//! ```

use bd_core::{DispatchConfig, FarmId, nitrogen_split};

/// The score of one candidate truckload and its components.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CandidateScore {
    pub farm:           FarmId,
    pub distance_km:    f64,
    pub package_tons:   f64,
    pub useful_n:       f64,
    pub excess_n:       f64,
    pub credit:         f64,
    pub transport_cost: f64,
    pub leaching_cost:  f64,
    pub score:          f64,
}

/// Score one truckload.  `package_tons` must already be capped at truck
/// capacity so transport is charged as a single one-way trip.
pub fn score_candidate(
    config:       &DispatchConfig,
    farm:         FarmId,
    distance_km:  f64,
    package_tons: f64,
    residual_kg:  f64,
) -> CandidateScore {
    let package_n = config.package_nitrogen(package_tons);
    let (useful_n, excess_n) = nitrogen_split(package_n, residual_kg);

    let credit = config.offset_gain(useful_n) + config.sequestration_gain(package_tons);
    let transport_cost = config.transport_emission(distance_km);
    let leaching_cost = config.leaching_penalty(excess_n);

    CandidateScore {
        farm,
        distance_km,
        package_tons,
        useful_n,
        excess_n,
        credit,
        transport_cost,
        leaching_cost,
        score: credit - transport_cost - leaching_cost,
    }
}
