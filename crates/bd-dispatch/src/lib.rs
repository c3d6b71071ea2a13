//! `bd-dispatch` — the daily greedy dispatch engine.
//!
//! # Day loop
//!
//! ```text
//! for date in Jan 1 ..= Dec 31:
//!   ① Replenish  — every plant gains its fixed daily output.
//!   ② Snapshot   — copy the day's demand into a residual tracker.
//!   ③ Filter     — drop farms whose zone is rain-locked today.
//!   ④ Rank       — plants by (excess over capacity, fill ratio), descending.
//!   ⑤ Allocate   — per plant: score one truckload for every open farm, sort,
//!                  walk once; ship while urgent or profitable.
//!   ⑥ Clamp      — dump and penalise anything above capacity.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`scenario`]  | `Scenario` — config, registries, indices, demand          |
//! | [`ledger`]    | `StorageLedger`                                           |
//! | [`demand`]    | `DemandTable`, `DemandTracker`                            |
//! | [`scoring`]   | `CandidateScore`, `score_candidate`                       |
//! | [`engine`]    | `DispatchEngine`, `DaySummary`, `EngineTotals`, `EngineRun` |
//! | [`builder`]   | `EngineBuilder`                                           |
//! | [`observer`]  | `DispatchObserver`, `NoopObserver`                        |
//! | [`event`]     | `DeliveryEvent`, `Solution`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bd_dispatch::{EngineBuilder, NoopObserver, Scenario};
//!
//! let scenario = Scenario::new(config, plants, farms, &rainfall, demand)?;
//! let run = EngineBuilder::new(&scenario).build()?.run(&mut NoopObserver);
//! println!("{} deliveries", run.solution.len());
//! ```

pub mod builder;
pub mod demand;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod observer;
pub mod scenario;
pub mod scoring;


pub use builder::EngineBuilder;
pub use demand::{DemandTable, DemandTracker};
pub use engine::{DaySummary, DispatchEngine, EngineRun, EngineTotals};
pub use error::{DispatchError, DispatchResult};
pub use event::{DeliveryEvent, Solution};
pub use ledger::StorageLedger;
pub use observer::{DispatchObserver, NoopObserver};
pub use scenario::Scenario;
pub use scoring::{CandidateScore, score_candidate};
