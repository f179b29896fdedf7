//! The opaque policy evaluator and two stock implementations.

use std::collections::VecDeque;

use shop_core::SimRng;

use crate::{ActionTriple, DecisionCategory, DistractionAction, NavigationAction, OBSERVATION_WIDTH, PurchaseAction};

/// Maps an encoded observation to a discrete action per category.
///
/// A policy is stateful and single-consumer: the scheduler that owns it
/// calls [`evaluate`][Self::evaluate] for one request at a time and feeds the
/// resulting reward back through [`add_reward`][Self::add_reward] before the
/// next evaluation begins.  How (or whether) the policy learns from rewards is
/// its own business.
pub trait PolicyEvaluator {
    /// Produce an action triple for `observation`.  Only the component for
    /// `category` is used; the other two are ignored.
    fn evaluate(
        &mut self,
        category:    DecisionCategory,
        observation: &[f32; OBSERVATION_WIDTH],
    ) -> ActionTriple;

    /// Accumulate the reward earned by the most recent evaluation.
    fn add_reward(&mut self, reward: f32);

    /// The scheduler's episode counter rolled over.
    ///
    /// Default: does nothing.
    fn end_episode(&mut self) {}
}

/// Type-erased policy, used where brain kinds with different policies share
/// one container.
pub type BoxedPolicy = Box<dyn PolicyEvaluator>;

impl<P: PolicyEvaluator + ?Sized> PolicyEvaluator for Box<P> {
    fn evaluate(
        &mut self,
        category:    DecisionCategory,
        observation: &[f32; OBSERVATION_WIDTH],
    ) -> ActionTriple {
        (**self).evaluate(category, observation)
    }

    fn add_reward(&mut self, reward: f32) {
        (**self).add_reward(reward);
    }

    fn end_episode(&mut self) {
        (**self).end_episode();
    }
}

// ── RandomPolicy ──────────────────────────────────────────────────────────────

/// Heuristic stand-in for a trained model: every component is drawn uniformly
/// from its category's action range, ignoring the observation.
pub struct RandomPolicy {
    rng:              SimRng,
    episode_reward:   f32,
    /// Total reward of each finished episode, oldest first.
    pub episode_totals: Vec<f32>,
}

impl RandomPolicy {
    pub fn new(rng: SimRng) -> Self {
        Self { rng, episode_reward: 0.0, episode_totals: Vec::new() }
    }

    pub fn episode_reward(&self) -> f32 {
        self.episode_reward
    }
}

impl PolicyEvaluator for RandomPolicy {
    fn evaluate(&mut self, _: DecisionCategory, _: &[f32; OBSERVATION_WIDTH]) -> ActionTriple {
        ActionTriple::new(
            self.rng.gen_range(0..PurchaseAction::COUNT),
            self.rng.gen_range(0..NavigationAction::COUNT),
            self.rng.gen_range(0..DistractionAction::COUNT),
        )
    }

    fn add_reward(&mut self, reward: f32) {
        self.episode_reward += reward;
    }

    fn end_episode(&mut self) {
        self.episode_totals.push(self.episode_reward);
        self.episode_reward = 0.0;
    }
}

// ── ScriptedPolicy ────────────────────────────────────────────────────────────

/// Replays queued action triples, then falls back to a fixed triple.
///
/// Records everything it sees, which makes it the policy of choice for tests
/// and for demos that want a predictable shopper.
#[derive(Default)]
pub struct ScriptedPolicy {
    script:       VecDeque<ActionTriple>,
    fallback:     ActionTriple,
    /// Every evaluation, in order: the category and the encoded observation.
    pub evaluated: Vec<(DecisionCategory, [f32; OBSERVATION_WIDTH])>,
    pub rewards:   Vec<f32>,
    pub episodes_ended: u32,
}

impl ScriptedPolicy {
    /// Always answer with `triple`.
    pub fn constant(triple: ActionTriple) -> Self {
        Self { fallback: triple, ..Self::default() }
    }

    /// Answer with `script` in order, then with `fallback` forever.
    pub fn scripted(script: impl IntoIterator<Item = ActionTriple>, fallback: ActionTriple) -> Self {
        Self { script: script.into_iter().collect(), fallback, ..Self::default() }
    }

    pub fn push(&mut self, triple: ActionTriple) {
        self.script.push_back(triple);
    }
}

impl PolicyEvaluator for ScriptedPolicy {
    fn evaluate(
        &mut self,
        category:    DecisionCategory,
        observation: &[f32; OBSERVATION_WIDTH],
    ) -> ActionTriple {
        self.evaluated.push((category, *observation));
        self.script.pop_front().unwrap_or(self.fallback)
    }

    fn add_reward(&mut self, reward: f32) {
        self.rewards.push(reward);
    }

    fn end_episode(&mut self) {
        self.episodes_ended += 1;
    }
}
