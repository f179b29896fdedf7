//! Fluent builder for constructing a [`Sim`].

use std::collections::BTreeMap;

use shop_brain::{
    BoxedPolicy, BrainKind, BrainSet, DecisionScheduler, DecisionTracker, PolicyEvaluator,
    RandomPolicy, RewardTable,
};
use shop_catalog::{AisleLedger, StoreCatalog, StoreLayout};
use shop_checkout::{CheckoutManager, StationLayout};
use shop_core::{SimConfig, SimRng};
use shop_nav::{Navigator, WalkingNavigator};

use crate::{Sim, SimError, SimResult};

/// Child stream offsets of the run's master RNG.
const BRAIN_STREAM: u64 = 1;
const CHECKOUT_STREAM: u64 = 2;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick duration, seed, distances, episode threshold, …
/// - [`StoreCatalog`] — at least one aisle
/// - [`StoreLayout`] — entry, exit, checkout staging area
/// - at least one checkout station via [`station`][Self::station]
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                                        |
/// |-----------------------|------------------------------------------------|
/// | `.navigator(n)`       | `WalkingNavigator` at `config.walk_speed`      |
/// | `.policy(kind, p)`    | `RandomPolicy` on its own RNG stream           |
/// | `.rewards(kind, t)`   | `kind.reward_table()`                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, catalog, layout)
///     .stations(station_layouts)
///     .policy(BrainKind::GoalOriented, my_policy)
///     .build()?;
/// ```
pub struct SimBuilder {
    config:    SimConfig,
    catalog:   StoreCatalog,
    layout:    StoreLayout,
    navigator: Option<Box<dyn Navigator>>,
    stations:  Vec<StationLayout>,
    policies:  BTreeMap<BrainKind, BoxedPolicy>,
    rewards:   BTreeMap<BrainKind, RewardTable>,
}

impl SimBuilder {
    /// Create a builder with all required inputs except stations.
    pub fn new(config: SimConfig, catalog: StoreCatalog, layout: StoreLayout) -> Self {
        Self {
            config,
            catalog,
            layout,
            navigator: None,
            stations:  Vec::new(),
            policies:  BTreeMap::new(),
            rewards:   BTreeMap::new(),
        }
    }

    /// Replace the default straight-line walker.
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }

    /// Add one checkout station.  Stations get ids in the order added.
    pub fn station(mut self, layout: StationLayout) -> Self {
        self.stations.push(layout);
        self
    }

    pub fn stations(mut self, layouts: impl IntoIterator<Item = StationLayout>) -> Self {
        self.stations.extend(layouts);
        self
    }

    /// Serve `kind`'s decisions with `policy` instead of a random one.
    pub fn policy(mut self, kind: BrainKind, policy: impl PolicyEvaluator + 'static) -> Self {
        self.policies.insert(kind, Box::new(policy));
        self
    }

    /// Score `kind`'s decisions with `table`.
    pub fn rewards(mut self, kind: BrainKind, table: RewardTable) -> Self {
        self.rewards.insert(kind, table);
        self
    }

    /// Validate inputs, wire up the brains and checkout, and return a
    /// ready-to-run [`Sim`] with no shoppers.
    pub fn build(mut self) -> SimResult<Sim> {
        self.config.validate()?;
        if self.stations.is_empty() {
            return Err(SimError::NoStations);
        }
        if self.catalog.is_empty() {
            return Err(SimError::EmptyCatalog);
        }

        let mut master = SimRng::new(self.config.seed);
        let mut brain_rng = master.child(BRAIN_STREAM);
        let threshold = self.config.episode_threshold;

        // ── Brains: random by default, overridden per kind ────────────────
        let mut brains = BrainSet::with_random_policies(threshold, &mut brain_rng);
        for kind in BrainKind::ALL {
            let policy = self.policies.remove(&kind);
            let rewards = self.rewards.remove(&kind);
            if policy.is_none() && rewards.is_none() {
                continue;
            }
            let policy = policy.unwrap_or_else(|| {
                Box::new(RandomPolicy::new(brain_rng.child(kind.index() as u64)))
            });
            let scheduler = DecisionScheduler::new(kind, policy, threshold)
                .with_rewards(rewards.unwrap_or_else(|| kind.reward_table()));
            brains.install(scheduler);
        }

        // ── Checkout stations ─────────────────────────────────────────────
        let mut checkout = CheckoutManager::new(
            master.child(CHECKOUT_STREAM),
            self.config.processing_stopping_distance,
        );
        for layout in self.stations {
            checkout.add_station(layout);
        }

        let nav = self
            .navigator
            .unwrap_or_else(|| Box::new(WalkingNavigator::new(self.config.walk_speed)));
        let ledger = AisleLedger::new(&self.catalog);

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            catalog:    self.catalog,
            layout:     self.layout,
            nav,
            brains,
            checkout,
            ledger,
            tracker:    DecisionTracker::new(),
            shoppers:   BTreeMap::new(),
            next_agent: 0,
            retired:    0,
        })
    }
}
