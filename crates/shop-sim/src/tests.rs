//! Integration tests for shop-sim.

use shop_brain::{ActionTriple, BrainKind, Delivery, RewardTable, ScriptedPolicy};
use shop_catalog::{AisleClass, StoreCatalog, StoreCatalogBuilder, StoreLayout};
use shop_checkout::{CheckoutDone, StationLayout};
use shop_core::{AgentId, Area, Point, SimConfig, Tick};
use shop_shopper::{RetiredShopper, ShopperState};

use crate::{NoopObserver, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> SimConfig {
    SimConfig {
        total_ticks:       3_000,
        seed:              7,
        shopping_list_min: 1,
        shopping_list_max: 2,
        ..SimConfig::default()
    }
}

/// One aisle per class, all within a few metres of the entry.
fn small_catalog() -> StoreCatalog {
    let mut b = StoreCatalogBuilder::new();
    b.add_aisle("Produce", AisleClass::Fresh, Point::new(6.0, 0.0, 0.0)).unwrap();
    b.add_aisle("Pantry", AisleClass::Essentials, Point::new(6.0, 0.0, 6.0)).unwrap();
    b.add_aisle("Snacks", AisleClass::Others, Point::new(0.0, 0.0, 10.0)).unwrap();
    b.add_aisle("Deals", AisleClass::Offers, Point::new(-6.0, 0.0, 6.0)).unwrap();
    b.build()
}

fn small_layout() -> StoreLayout {
    StoreLayout::new(
        Point::ORIGIN,
        Point::new(-3.0, 0.0, 0.0),
        Area::point(Point::new(0.0, 0.0, 3.0)),
    )
}

fn builder(config: SimConfig) -> SimBuilder {
    SimBuilder::new(config, small_catalog(), small_layout())
        .station(StationLayout::facing_south(Point::new(2.0, 0.0, 7.0)))
}

/// Buy, walk to the nearest listed aisle, never follow a distraction.
fn diligent() -> ScriptedPolicy {
    ScriptedPolicy::constant(ActionTriple::new(0, 1, 0))
}

#[derive(Default)]
struct Recorder {
    ticks:     u64,
    decisions: usize,
    invalid:   usize,
    episodes:  [u32; 3],
    checkouts: Vec<CheckoutDone>,
    retired:   Vec<RetiredShopper>,
    ended_at:  Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, _tick: Tick, _active: usize) {
        self.ticks += 1;
    }

    fn on_decision(&mut self, _tick: Tick, _brain: BrainKind, delivery: &Delivery) {
        match delivery.decision {
            Some(_) => self.decisions += 1,
            None    => self.invalid += 1,
        }
    }

    fn on_episode_end(&mut self, _tick: Tick, brain: BrainKind, completed: u32) {
        self.episodes[brain.index()] = completed;
    }

    fn on_checkout_done(&mut self, _tick: Tick, done: &CheckoutDone) {
        self.checkouts.push(*done);
    }

    fn on_agent_retired(&mut self, _tick: Tick, shopper: &RetiredShopper) {
        self.retired.push(shopper.clone());
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended_at = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = builder(test_config())
            .station(StationLayout::facing_south(Point::new(-2.0, 0.0, 7.0)))
            .build()
            .unwrap();
        assert_eq!(sim.active_shoppers(), 0);
        assert_eq!(sim.checkout.stations().len(), 2);
        assert_eq!(sim.clock.current_tick, Tick::ZERO);
        for kind in BrainKind::ALL {
            assert_eq!(sim.brains.get(kind).rewards(), &kind.reward_table());
        }
    }

    #[test]
    fn missing_stations_errors() {
        let result = SimBuilder::new(test_config(), small_catalog(), small_layout()).build();
        assert!(matches!(result, Err(SimError::NoStations)));
    }

    #[test]
    fn empty_catalog_errors() {
        let result = SimBuilder::new(test_config(), StoreCatalogBuilder::new().build(), small_layout())
            .station(StationLayout::facing_south(Point::ORIGIN))
            .build();
        assert!(matches!(result, Err(SimError::EmptyCatalog)));
    }

    #[test]
    fn invalid_config_errors() {
        let config = SimConfig { tick_duration_secs: 0.0, ..test_config() };
        assert!(matches!(builder(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn per_kind_rewards_override_only_that_kind() {
        let sim = builder(test_config())
            .rewards(BrainKind::Impulse, RewardTable::wanderer())
            .build()
            .unwrap();
        assert_eq!(sim.brains.get(BrainKind::Impulse).rewards(), &RewardTable::wanderer());
        assert_eq!(sim.brains.get(BrainKind::GoalOriented).rewards(), &RewardTable::goal_oriented());
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn spawn_assigns_sequential_ids_and_places_shopper() {
        let mut sim = builder(test_config()).build().unwrap();
        let a = sim.spawn(BrainKind::Impulse, Point::ORIGIN);
        let b = sim.spawn(BrainKind::Wanderer, Point::new(1.0, 0.0, 0.0));
        assert_eq!((a, b), (AgentId(0), AgentId(1)));
        assert_eq!(sim.active_shoppers(), 2);
        assert_eq!(sim.nav.position(b), Some(Point::new(1.0, 0.0, 0.0)));

        let s = sim.shopper(a).unwrap();
        assert_eq!(s.state(), ShopperState::Enter);
        assert!((1..=2).contains(&s.shopping_list().len()));
    }

    #[test]
    fn run_stops_at_total_ticks() {
        let config = SimConfig { total_ticks: 50, ..test_config() };
        let mut sim = builder(config).build().unwrap();
        sim.spawn(BrainKind::GoalOriented, Point::ORIGIN);
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(rec.ticks, 50);
        assert_eq!(rec.ended_at, Some(Tick(50)));
        assert_eq!(sim.clock.current_tick, Tick(50));
    }

    #[test]
    fn diligent_shoppers_complete_their_visit() {
        let mut sim = builder(test_config()).policy(BrainKind::GoalOriented, diligent()).build().unwrap();
        let ids: Vec<AgentId> = (0..3).map(|_| sim.spawn(BrainKind::GoalOriented, Point::ORIGIN)).collect();
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        assert_eq!(sim.active_shoppers(), 0);
        assert_eq!(sim.retired_shoppers(), 3);
        assert_eq!(sim.tracker.total_exits(), 3);
        assert_eq!(sim.checkout.total_queued(), 0);
        assert_eq!(sim.brains.get(BrainKind::GoalOriented).queue_len(), 0);
        for id in &ids {
            assert_eq!(sim.nav.position(*id), None, "retired shopper still placed");
        }

        assert_eq!(rec.retired.len(), 3);
        assert_eq!(rec.checkouts.len(), 3);
        for r in &rec.retired {
            assert_eq!(r.list_remaining, 0);
            assert!(r.counters.total_bought >= 1);
        }
        let bought: u32 = rec.retired.iter().map(|r| r.counters.total_bought).sum();
        let ledger_bought: u32 = sim.ledger.iter().map(|(_, s)| s.bought).sum();
        assert_eq!(bought, ledger_bought);
        assert_eq!(rec.invalid, 0);
        assert_eq!(rec.decisions as u64, sim.tracker.total_decisions());
    }

    #[test]
    fn episodes_close_every_threshold_deliveries() {
        let config = SimConfig { episode_threshold: 3, ..test_config() };
        let mut sim = builder(config).policy(BrainKind::GoalOriented, diligent()).build().unwrap();
        for _ in 0..3 {
            sim.spawn(BrainKind::GoalOriented, Point::ORIGIN);
        }
        let mut rec = Recorder::default();
        sim.run(&mut rec);

        let episode = sim.brains.get(BrainKind::GoalOriented).episode();
        assert!(episode.completed() >= 1);
        assert_eq!(rec.episodes[BrainKind::GoalOriented.index()], episode.completed());
        assert_eq!(rec.episodes[BrainKind::Impulse.index()], 0);
        assert!(episode.total_delivered() >= 3 * episode.completed() as u64);
    }

    #[test]
    fn out_of_range_actions_never_stall_the_loop() {
        let mut sim = builder(test_config())
            .policy(BrainKind::Wanderer, ScriptedPolicy::constant(ActionTriple::new(7, 9, 5)))
            .build()
            .unwrap();
        let id = sim.spawn(BrainKind::Wanderer, Point::ORIGIN);
        let mut rec = Recorder::default();
        sim.run_ticks(300, &mut rec);

        assert!(rec.invalid > 0);
        assert_eq!(rec.decisions, 0);
        assert_eq!(sim.tracker.total_decisions(), 0);
        assert_eq!(sim.shopper(id).unwrap().state(), ShopperState::Shopping);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut sim = builder(test_config()).build().unwrap();
            for kind in [BrainKind::GoalOriented, BrainKind::Impulse, BrainKind::Wanderer, BrainKind::Impulse] {
                sim.spawn(kind, Point::ORIGIN);
            }
            let mut rec = Recorder::default();
            sim.run_ticks(1_500, &mut rec);
            let positions: Vec<_> = (0..4).map(|i| sim.nav.position(AgentId(i))).collect();
            let ledger: Vec<_> = sim.ledger.iter().map(|(a, s)| (a, s.clone())).collect();
            (positions, ledger, rec.retired, sim.tracker.total_decisions())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn noop_observer_runs() {
        let config = SimConfig { total_ticks: 20, ..test_config() };
        let mut sim = builder(config).build().unwrap();
        sim.spawn(BrainKind::Impulse, Point::ORIGIN);
        sim.run(&mut NoopObserver);
        assert_eq!(sim.clock.current_tick, Tick(20));
    }
}
