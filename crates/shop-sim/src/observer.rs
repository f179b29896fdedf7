//! Simulation observer trait for progress reporting and data collection.

use shop_brain::{BrainKind, Delivery};
use shop_checkout::CheckoutDone;
use shop_core::Tick;
use shop_shopper::RetiredShopper;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — exit counter
///
/// ```rust,ignore
/// struct Exits(usize);
///
/// impl SimObserver for Exits {
///     fn on_agent_retired(&mut self, _tick: Tick, _shopper: &RetiredShopper) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the number of shoppers still in
    /// the store.
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {}

    /// A scheduler serviced a request.  `delivery.decision` is `None` when
    /// the policy answered out of range.
    fn on_decision(&mut self, _tick: Tick, _brain: BrainKind, _delivery: &Delivery) {}

    /// `brain`'s policy finished an episode; `completed` counts episodes so far.
    fn on_episode_end(&mut self, _tick: Tick, _brain: BrainKind, _completed: u32) {}

    fn on_checkout_done(&mut self, _tick: Tick, _done: &CheckoutDone) {}

    /// A shopper reached the exit and has been removed from every subsystem.
    fn on_agent_retired(&mut self, _tick: Tick, _shopper: &RetiredShopper) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
