//! `DecisionTracker` — run-wide decision and exit counters.
//!
//! Created once by the simulation driver and passed by `&mut` to every
//! scheduler advance; there is no global instance.

use rustc_hash::FxHashMap;

use crate::{BrainKind, Decision, DecisionCategory};

#[derive(Default, Debug)]
pub struct DecisionTracker {
    /// `(brain, category, raw action)` → times delivered.
    decisions: FxHashMap<(BrainKind, DecisionCategory, u8), u64>,
    /// Shoppers retired per brain kind.
    exits:     FxHashMap<BrainKind, u32>,
}

impl DecisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decision(&mut self, brain: BrainKind, decision: Decision) {
        *self
            .decisions
            .entry((brain, decision.category(), decision.raw()))
            .or_insert(0) += 1;
    }

    /// Count a retired shopper.
    ///
    /// Instrumentation only: episode boundaries come from each scheduler's
    /// own [`EpisodeCounter`](crate::EpisodeCounter), never from exits.
    pub fn record_exit(&mut self, brain: BrainKind) {
        *self.exits.entry(brain).or_insert(0) += 1;
    }

    pub fn count(&self, brain: BrainKind, decision: Decision) -> u64 {
        self.decisions
            .get(&(brain, decision.category(), decision.raw()))
            .copied()
            .unwrap_or(0)
    }

    /// All decisions `brain` delivered in `category`.
    pub fn category_total(&self, brain: BrainKind, category: DecisionCategory) -> u64 {
        self.decisions
            .iter()
            .filter(|((b, c, _), _)| *b == brain && *c == category)
            .map(|(_, n)| *n)
            .sum()
    }

    pub fn total_decisions(&self) -> u64 {
        self.decisions.values().sum()
    }

    pub fn exits(&self, brain: BrainKind) -> u32 {
        self.exits.get(&brain).copied().unwrap_or(0)
    }

    pub fn total_exits(&self) -> u32 {
        self.exits.values().sum()
    }

    pub fn reset(&mut self) {
        self.decisions.clear();
        self.exits.clear();
    }
}
