//! `shop-sim` — tick loop driver for the shopper simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Movement   — Navigator::advance moves every walking shopper.
//!   ② Shoppers   — Shopper::tick for each active shopper, ascending AgentId.
//!                  Decision requests are filed with the shopper's brain.
//!   ③ Brains     — each brain kind's scheduler services at most one request
//!                  and may close its episode.
//!   ④ Checkout   — stations advance their heads; finished shoppers are sent
//!                  to the exit.
//!   ⑤ Retirement — shoppers that reached the exit are removed from the
//!                  schedulers, the checkout queues, and the navigator.
//! ```
//!
//! Runtime faults (a missing navigation entry, an unknown station) are logged
//! and skipped; they never abort the loop.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use shop_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, catalog, layout)
//!     .station(StationLayout::facing_south(Point::new(0.0, 0.0, 8.0)))
//!     .build()?;
//! sim.spawn(BrainKind::Impulse, layout.entry);
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
