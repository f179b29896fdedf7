//! The `Sim` struct and its tick loop.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use shop_brain::{BrainKind, BrainSet, DecisionTracker};
use shop_catalog::{AisleLedger, StoreCatalog, StoreLayout};
use shop_checkout::CheckoutManager;
use shop_core::{AgentId, AgentRng, Point, SimClock, SimConfig, Tick};
use shop_nav::Navigator;
use shop_shopper::{RetiredShopper, Shopper, ShopperContext};

use crate::SimObserver;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns every subsystem and drives the five-phase tick loop described
/// in the crate docs.  Shoppers are ticked in ascending [`AgentId`] order so
/// a run is fully determined by the seed and the spawn calls.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (tick duration, seed, distances, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to simulated seconds.
    pub clock: SimClock,

    pub catalog: StoreCatalog,
    pub layout:  StoreLayout,

    /// Movement oracle shared by shoppers and checkout.
    pub nav: Box<dyn Navigator>,

    /// One decision scheduler per brain kind.
    pub brains: BrainSet,

    pub checkout: CheckoutManager,

    /// Bought / browsed / ignored counts per aisle.
    pub ledger: AisleLedger,

    /// Delivered decisions per (brain, action) and legacy exit counts.
    pub tracker: DecisionTracker,

    pub(crate) shoppers:   BTreeMap<AgentId, Shopper>,
    pub(crate) next_agent: u32,
    pub(crate) retired:    usize,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Add a shopper with brain `kind` at `position` and send it to the entry.
    ///
    /// Ids are allocated sequentially and never reused.  The shopping list is
    /// drawn from the catalog with the shopper's own RNG stream.
    pub fn spawn(&mut self, kind: BrainKind, position: Point) -> AgentId {
        let id = AgentId(self.next_agent);
        self.next_agent += 1;

        let mut rng = AgentRng::new(self.config.seed, id);
        let list = self.catalog.random_shopping_list(
            &mut rng,
            self.config.shopping_list_min,
            self.config.shopping_list_max,
        );
        debug!(agent = %id, brain = %kind, items = list.len(), "shopper spawned");

        self.nav.place(id, position);
        let mut shopper = Shopper::new(id, kind, list, rng);
        shopper.enter(&mut *self.nav, &self.layout);
        self.shoppers.insert(id, shopper);
        id
    }

    /// Shoppers currently in the store.
    pub fn active_shoppers(&self) -> usize {
        self.shoppers.len()
    }

    /// Shoppers that have left the store so far.
    pub fn retired_shoppers(&self) -> usize {
        self.retired
    }

    pub fn shopper(&self, id: AgentId) -> Option<&Shopper> {
        self.shoppers.get(&id)
    }

    /// Active shoppers, ascending id.
    pub fn shoppers(&self) -> impl Iterator<Item = &Shopper> {
        self.shoppers.values()
    }

    /// Run the simulation from the current tick to `config.total_ticks`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        let end = Tick(self.config.total_ticks);
        while self.clock.current_tick < end {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `total_ticks`).
    ///
    /// Useful for tests, and for drivers that spawn shoppers between ticks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer);
        observer.on_tick_end(now, self.shoppers.len());
        self.clock.advance();
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        let dt = self.config.tick_duration_secs;

        // ── Phase 1: movement ─────────────────────────────────────────────
        self.nav.advance(dt);

        // ── Phase 2: shoppers, ascending id ───────────────────────────────
        //
        // Field borrows keep the shopper map disjoint from its collaborators.
        let mut leaving: Vec<RetiredShopper> = Vec::new();
        for shopper in self.shoppers.values_mut() {
            let mut ctx = ShopperContext {
                config:   &self.config,
                catalog:  &self.catalog,
                layout:   &self.layout,
                nav:      &mut *self.nav,
                brain:    self.brains.get_mut(shopper.brain),
                checkout: &mut self.checkout,
                ledger:   &mut self.ledger,
            };
            if let Some(r) = shopper.tick(&mut ctx) {
                leaving.push(r);
            }
        }

        // ── Phase 3: brains ───────────────────────────────────────────────
        for (kind, report) in self.brains.advance_all(&mut self.tracker) {
            if let Some(delivery) = &report.delivery {
                observer.on_decision(now, kind, delivery);
            }
            if report.episode_ended {
                let completed = self.brains.get(kind).episode().completed();
                observer.on_episode_end(now, kind, completed);
            }
        }

        // ── Phase 4: checkout ─────────────────────────────────────────────
        for done in self.checkout.tick(dt, &mut *self.nav) {
            match self.shoppers.get_mut(&done.agent) {
                Some(s) => s.finish_checkout(&mut *self.nav, &self.layout),
                None => warn!(agent = %done.agent, "checkout finished for unknown shopper"),
            }
            observer.on_checkout_done(now, &done);
        }

        // ── Phase 5: retirement ───────────────────────────────────────────
        for r in leaving {
            self.retire(now, &r);
            observer.on_agent_retired(now, &r);
        }
    }

    /// Drop every trace of a shopper that reached the exit.
    fn retire(&mut self, now: Tick, r: &RetiredShopper) {
        self.shoppers.remove(&r.id);
        self.brains.forget(r.id);
        self.checkout.forget(r.id);
        self.nav.remove(r.id);
        self.tracker.record_exit(r.brain);
        self.retired += 1;
        debug!(
            tick = %now,
            agent = %r.id,
            brain = %r.brain,
            bought = r.counters.total_bought,
            left_on_list = r.list_remaining,
            "shopper retired"
        );
    }
}
