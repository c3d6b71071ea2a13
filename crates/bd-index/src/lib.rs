//! `bd-index` — static lookup tables built once before the day loop.
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`distance`]   | `DistanceIndex`: (plant, farm) → one-way km               |
//! | [`rain`]       | `RainfallTable`, `RainLockIndex`: (date, zone) → locked   |
//! | [`error`]      | `IndexError`, `IndexResult<T>`                            |
//!
//! Both indices are immutable once built and answer lookups in O(1) (distance)
//! or O(log D) (rain lock, binary search over the table's dates), so the
//! dispatch engine never re-scans the raw input tables inside its day loop.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Builds the distance matrix rows on Rayon.              |

pub mod distance;
pub mod error;
pub mod rain;

#[cfg(test)]
mod tests;

pub use distance::DistanceIndex;
pub use error::{IndexError, IndexResult};
pub use rain::{RainLockIndex, RainfallTable};
