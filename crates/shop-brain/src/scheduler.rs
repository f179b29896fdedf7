//! `DecisionScheduler` — serializes many shoppers' requests into one policy.
//!
//! # Protocol
//!
//! 1. A shopper calls [`request`][ShopperBrain::request].  The request is
//!    appended to the FIFO, or, if the same `(requester, category)` is
//!    already queued, its observation is replaced in place.  The pair is now
//!    *outstanding*.
//! 2. Once per tick the driver calls [`advance`][DecisionScheduler::advance].
//!    The head request is evaluated, rewarded, and its decision written to the
//!    requester's result slot.  Exactly one request is serviced per call.
//! 3. The shopper polls [`take_decision`][ShopperBrain::take_decision], which
//!    empties the slot and clears the outstanding flag.
//!
//! A policy component that is out of range for its category is logged and
//! earns zero reward; nothing is written to the slot, so the requester sees
//! its flag cleared and simply asks again.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

use shop_core::AgentId;

use crate::{
    BrainKind, Decision, DecisionCategory, DecisionTracker, EpisodeCounter, Observation,
    PolicyEvaluator, RewardTable, ShopperBrain,
};

type RequestKey = (AgentId, DecisionCategory);

/// One pending decision request.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionRequest {
    pub requester:   AgentId,
    pub category:    DecisionCategory,
    /// Copied at enqueue time; replaced if the requester asks again.
    pub observation: Observation,
}

impl DecisionRequest {
    fn key(&self) -> RequestKey {
        (self.requester, self.category)
    }
}

/// Outcome of servicing one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    pub requester: AgentId,
    pub category:  DecisionCategory,
    /// `None` when the policy's component was out of range.
    pub decision:  Option<Decision>,
    pub reward:    f32,
}

/// What happened during one [`DecisionScheduler::advance`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdvanceReport {
    pub delivery:      Option<Delivery>,
    pub episode_ended: bool,
}

// ── DecisionScheduler ─────────────────────────────────────────────────────────

pub struct DecisionScheduler<P: PolicyEvaluator> {
    kind:      BrainKind,
    policy:    P,
    rewards:   RewardTable,
    queue:     VecDeque<DecisionRequest>,
    /// Keys currently in `queue`, for O(1) dedupe checks.
    queued:    FxHashSet<RequestKey>,
    in_flight: Option<RequestKey>,
    /// Delivered, not yet taken.
    results:   FxHashMap<RequestKey, Decision>,
    episode:   EpisodeCounter,
}

impl<P: PolicyEvaluator> DecisionScheduler<P> {
    pub fn new(kind: BrainKind, policy: P, episode_threshold: u32) -> Self {
        Self {
            kind,
            policy,
            rewards:   kind.reward_table(),
            queue:     VecDeque::new(),
            queued:    FxHashSet::default(),
            in_flight: None,
            results:   FxHashMap::default(),
            episode:   EpisodeCounter::new(episode_threshold),
        }
    }

    /// Override the kind's default reward table.
    pub fn with_rewards(mut self, rewards: RewardTable) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn kind(&self) -> BrainKind {
        self.kind
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn rewards(&self) -> &RewardTable {
        &self.rewards
    }

    pub fn episode(&self) -> &EpisodeCounter {
        &self.episode
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Pending requests, head first.
    pub fn pending(&self) -> impl Iterator<Item = &DecisionRequest> {
        self.queue.iter()
    }

    pub fn is_evaluating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Service the head request, if any.
    pub fn advance(&mut self, tracker: &mut DecisionTracker) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        if self.in_flight.is_some() {
            return report;
        }
        let Some(request) = self.queue.pop_front() else {
            return report;
        };
        let key = request.key();
        self.queued.remove(&key);
        self.in_flight = Some(key);

        let encoded = request.observation.encode(request.category);
        let triple = self.policy.evaluate(request.category, &encoded);
        let decision = triple.decision_for(request.category);

        let reward = match decision {
            Some(d) => self.rewards.reward(d, &request.observation),
            None => {
                warn!(
                    brain = %self.kind,
                    requester = %request.requester,
                    category = %request.category,
                    raw = triple.component(request.category),
                    "policy returned an out-of-range action; dropping"
                );
                0.0
            }
        };
        self.policy.add_reward(reward);

        if let Some(d) = decision {
            tracker.record_decision(self.kind, d);
            self.results.insert(key, d);
        }
        self.in_flight = None;
        self.episode.record_delivery();

        debug!(
            brain = %self.kind,
            requester = %request.requester,
            category = %request.category,
            ?decision,
            reward,
            "decision delivered"
        );

        report.delivery = Some(Delivery {
            requester: request.requester,
            category: request.category,
            decision,
            reward,
        });
        report.episode_ended = self.maybe_end_episode();
        report
    }

    fn maybe_end_episode(&mut self) -> bool {
        if !self.episode.try_rollover(self.in_flight.is_some()) {
            return false;
        }
        self.policy.end_episode();
        info!(
            brain = %self.kind,
            episode = self.episode.completed(),
            "episode ended"
        );
        true
    }
}

impl<P: PolicyEvaluator> ShopperBrain for DecisionScheduler<P> {
    fn request(&mut self, requester: AgentId, category: DecisionCategory, observation: Observation) {
        let key = (requester, category);
        if self.results.contains_key(&key) {
            debug!(%requester, %category, "decision already waiting; request ignored");
            return;
        }
        if self.queued.contains(&key) {
            if let Some(pending) = self.queue.iter_mut().find(|r| r.key() == key) {
                pending.observation = observation;
            }
            return;
        }
        self.queue.push_back(DecisionRequest { requester, category, observation });
        self.queued.insert(key);
    }

    fn is_outstanding(&self, requester: AgentId, category: DecisionCategory) -> bool {
        let key = (requester, category);
        self.queued.contains(&key) || self.results.contains_key(&key) || self.in_flight == Some(key)
    }

    fn take_decision(&mut self, requester: AgentId, category: DecisionCategory) -> Option<Decision> {
        self.results.remove(&(requester, category))
    }

    fn forget(&mut self, requester: AgentId) {
        self.queue.retain(|r| r.requester != requester);
        self.queued.retain(|(a, _)| *a != requester);
        self.results.retain(|(a, _), _| *a != requester);
    }
}
