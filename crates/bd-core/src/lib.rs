//! `bd-core` — foundational types for the biosolid dispatch planner.
//!
//! This crate is a dependency of every other `bd-*` crate.  It has no `bd-*`
//! dependencies and only a handful of external ones (`chrono`, `rustc-hash`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `PlantId`, `FarmId`, `ZoneId`                           |
//! | [`geo`]         | `GeoPoint`, haversine distance in kilometres            |
//! | [`calendar`]    | `SimYear` day iterator, monsoon months                  |
//! | [`config`]      | `DispatchConfig` (the read-only economic constants)     |
//! | [`registry`]    | `Plant`, `Farm`, `PlantRegistry`, `FarmRegistry`        |
//! | [`error`]       | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, points and config.  |

pub mod calendar;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod registry;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calendar::{SimYear, is_monsoon};
pub use config::{DEMAND_BUFFER_FACTOR, DispatchConfig, KG_PER_TON, nitrogen_split};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{FarmId, PlantId, ZoneId};
pub use registry::{Farm, FarmRegistry, Plant, PlantRegistry};
