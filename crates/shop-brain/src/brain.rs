//! The shopper-facing brain capability and the per-kind scheduler set.

use std::fmt;
use std::str::FromStr;

use shop_core::{AgentId, SimRng};

use crate::{
    AdvanceReport, BoxedPolicy, BrainError, Decision, DecisionCategory, DecisionScheduler,
    DecisionTracker, Observation, RandomPolicy, RewardTable,
};

/// What a shopper may ask of its brain.
///
/// Requests never block: the shopper checks
/// [`is_outstanding`][Self::is_outstanding] before asking, then polls
/// [`take_decision`][Self::take_decision] on later ticks.
pub trait ShopperBrain {
    /// Enqueue a request, or refresh the observation of a queued one.
    fn request(&mut self, requester: AgentId, category: DecisionCategory, observation: Observation);

    /// `true` from the moment a request is made until its decision is taken
    /// (or dropped as invalid).
    fn is_outstanding(&self, requester: AgentId, category: DecisionCategory) -> bool;

    /// Remove and return the delivered decision, if one is waiting.
    fn take_decision(&mut self, requester: AgentId, category: DecisionCategory) -> Option<Decision>;

    /// Drop every queued request and undelivered result for a retired shopper.
    fn forget(&mut self, requester: AgentId);

    /// "What to do at this aisle?"
    fn request_purchase(&mut self, requester: AgentId, observation: Observation) {
        self.request(requester, DecisionCategory::Purchase, observation);
    }

    /// "Where to go next?"
    fn request_navigation(&mut self, requester: AgentId, observation: Observation) {
        self.request(requester, DecisionCategory::Navigation, observation);
    }

    /// "Follow the aisle that just caught my eye?"
    fn request_distraction(&mut self, requester: AgentId, observation: Observation) {
        self.request(requester, DecisionCategory::Distraction, observation);
    }
}

// ── BrainKind ─────────────────────────────────────────────────────────────────

/// The three interchangeable shopper personalities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BrainKind {
    GoalOriented = 0,
    Impulse      = 1,
    Wanderer     = 2,
}

impl BrainKind {
    pub const ALL: [BrainKind; 3] = [BrainKind::GoalOriented, BrainKind::Impulse, BrainKind::Wanderer];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BrainKind::GoalOriented => "goal",
            BrainKind::Impulse      => "impulse",
            BrainKind::Wanderer     => "wanderer",
        }
    }

    pub fn reward_table(self) -> RewardTable {
        match self {
            BrainKind::GoalOriented => RewardTable::goal_oriented(),
            BrainKind::Impulse      => RewardTable::impulse(),
            BrainKind::Wanderer     => RewardTable::wanderer(),
        }
    }
}

impl fmt::Display for BrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrainKind {
    type Err = BrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goal" | "goal_oriented" | "goal-oriented" => Ok(BrainKind::GoalOriented),
            "impulse" => Ok(BrainKind::Impulse),
            "wanderer" => Ok(BrainKind::Wanderer),
            _ => Err(BrainError::UnknownBrain(s.to_string())),
        }
    }
}

// ── BrainSet ──────────────────────────────────────────────────────────────────

/// One scheduler per [`BrainKind`], each owning its own policy.
pub struct BrainSet {
    schedulers: [DecisionScheduler<BoxedPolicy>; 3],
}

impl BrainSet {
    /// Every kind gets a [`RandomPolicy`] on its own child stream of `rng`
    /// and its default reward table.
    pub fn with_random_policies(episode_threshold: u32, rng: &mut SimRng) -> Self {
        let schedulers = BrainKind::ALL.map(|kind| {
            let policy: BoxedPolicy = Box::new(RandomPolicy::new(rng.child(kind.index() as u64)));
            DecisionScheduler::new(kind, policy, episode_threshold)
        });
        Self { schedulers }
    }

    /// Replace `kind`'s scheduler (and with it the policy, reward table, and
    /// any pending requests).
    pub fn install(&mut self, scheduler: DecisionScheduler<BoxedPolicy>) {
        let slot = scheduler.kind().index();
        self.schedulers[slot] = scheduler;
    }

    pub fn get(&self, kind: BrainKind) -> &DecisionScheduler<BoxedPolicy> {
        &self.schedulers[kind.index()]
    }

    pub fn get_mut(&mut self, kind: BrainKind) -> &mut DecisionScheduler<BoxedPolicy> {
        &mut self.schedulers[kind.index()]
    }

    /// Advance every scheduler once, in [`BrainKind::ALL`] order.
    pub fn advance_all(&mut self, tracker: &mut DecisionTracker) -> [(BrainKind, AdvanceReport); 3] {
        BrainKind::ALL.map(|kind| (kind, self.schedulers[kind.index()].advance(tracker)))
    }

    /// Remove a retired shopper from every scheduler.
    pub fn forget(&mut self, agent: AgentId) {
        for s in &mut self.schedulers {
            s.forget(agent);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecisionScheduler<BoxedPolicy>> {
        self.schedulers.iter()
    }
}
