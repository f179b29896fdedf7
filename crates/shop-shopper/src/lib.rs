//! `shop-shopper` — the per-agent shopping state machine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                             |
//! |---------------|----------------------------------------------------------------------|
//! | [`state`]     | `ShopperState`, `PurchaseCounters`, `AisleDistances`, `TimedAction`  |
//! | [`context`]   | `ShopperContext<'a>` — collaborators borrowed for one tick           |
//! | [`shopper`]   | `Shopper`, `RetiredShopper`                                          |
//!
//! # Lifecycle
//!
//! ```text
//! Enter ──arrive at entry──▶ Shopping ──nav "checkout" / empty list──▶ Checkout
//!                                                                         │
//!                     retired ◀──arrive at exit── Exit ◀──checkout done──┘
//! ```
//!
//! Nothing here blocks.  A shopper that needs a decision files a request with
//! its brain and polls for the answer on later ticks; timed actions are plain
//! countdowns decremented by the tick duration.

pub mod context;
pub mod shopper;
pub mod state;


pub use context::ShopperContext;
pub use shopper::{RetiredShopper, Shopper};
pub use state::{
    ActionCompletion, AisleDistances, CheckoutProgress, PurchaseCounters, ShopperState, TimedAction,
};
