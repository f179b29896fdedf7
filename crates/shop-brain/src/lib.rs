//! `shop-brain` — shared decision-making for shopper agents.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`action`]      | `DecisionCategory`, typed actions, `Decision`, `ActionTriple` |
//! | [`observation`] | `Observation` and its fixed-width encoding                    |
//! | [`reward`]      | `RewardTable` — per-brain reward shaping                      |
//! | [`policy`]      | `PolicyEvaluator` trait, `RandomPolicy`, `ScriptedPolicy`     |
//! | [`episode`]     | `EpisodeCounter`                                              |
//! | [`scheduler`]   | `DecisionScheduler<P>` — single-consumer request queue       |
//! | [`brain`]       | `ShopperBrain` trait, `BrainKind`, `BrainSet`                 |
//! | [`tracker`]     | `DecisionTracker` — decision and exit counters               |
//! | [`error`]       | `BrainError`, `BrainResult<T>`                                |
//!
//! # Design notes
//!
//! A policy can only evaluate one observation at a time, but every shopper
//! using that policy may want a decision on the same tick.  The scheduler owns
//! a FIFO of requests keyed by `(requester, category)` and admits exactly one
//! of them per [`DecisionScheduler::advance`] call.  Results land in a
//! requester-keyed slot that the shopper polls with
//! [`ShopperBrain::take_decision`]; shoppers never touch the queue directly.

pub mod action;
pub mod brain;
pub mod episode;
pub mod error;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod scheduler;
pub mod tracker;

#[cfg(test)]
mod tests;

pub use action::{
    ActionTriple, Decision, DecisionCategory, DistractionAction, NavigationAction, PurchaseAction,
};
pub use brain::{BrainKind, BrainSet, ShopperBrain};
pub use episode::EpisodeCounter;
pub use error::{BrainError, BrainResult};
pub use observation::{OBSERVATION_WIDTH, Observation, SENTINEL};
pub use policy::{BoxedPolicy, PolicyEvaluator, RandomPolicy, ScriptedPolicy};
pub use reward::RewardTable;
pub use scheduler::{AdvanceReport, DecisionRequest, DecisionScheduler, Delivery};
pub use tracker::DecisionTracker;
