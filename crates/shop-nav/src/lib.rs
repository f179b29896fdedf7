//! `shop-nav` — the navigation oracle consumed by shoppers and checkouts.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`navigator`] | `Navigator` trait, `UNREACHABLE_DISTANCE`                      |
//! | [`state`]     | `MovementState` — per-agent position and destination          |
//! | [`walking`]   | `WalkingNavigator` — straight-line walking with floor bounds  |
//! | [`error`]     | `NavError`, `NavResult<T>`                                    |
//!
//! Real path planning is outside this workspace.  The rest of the simulation
//! only ever talks to [`Navigator`], so a navmesh-backed implementation can be
//! dropped in without touching the shopper or checkout logic.

pub mod error;
pub mod navigator;
pub mod state;
pub mod walking;


pub use error::{NavError, NavResult};
pub use navigator::{Navigator, UNREACHABLE_DISTANCE};
pub use state::MovementState;
pub use walking::WalkingNavigator;
