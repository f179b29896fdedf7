//! `shop-core` — foundational types for the shopper simulation.
//!
//! Every other `shop-*` crate depends on this one.  It has no `shop-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `AisleId`, `StationId`                     |
//! | [`geo`]         | `Point`, `Area`, straight-line distance               |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `SimConfig` and its validation                        |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `ShopError`, `ShopResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{ShopError, ShopResult};
pub use geo::{Area, Point};
pub use ids::{AgentId, AisleId, StationId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
