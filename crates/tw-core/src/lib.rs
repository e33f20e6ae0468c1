//! `tw-core`: foundational types for the `turnwheel` turn engine.
//!
//! This crate is a dependency of every other `tw-*` crate.  It has no `tw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`grid`]        | `Cell`, 4- and 8-neighbourhoods, Chebyshev distance   |
//! | [`time`]        | `Tick`                                                |
//! | [`speed`]       | `SpeedTier`: default tick-gating predicate           |
//! | [`rng`]         | `SimRng`, `Shuffle`, `IdentityShuffle`                |
//! | [`config`]      | `EngineConfig`                                        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod speed;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::EngineConfig;
pub use error::{CoreError, CoreResult};
pub use grid::Cell;
pub use rng::{IdentityShuffle, Shuffle, SimRng};
pub use speed::SpeedTier;
pub use time::Tick;
