//! Reward shaping.
//!
//! Each brain kind scores delivered decisions with the same table shape; only
//! the constants differ.  The reward is a pure function of the decision and
//! the observation that was evaluated.

use shop_catalog::AisleClass;

use crate::{Decision, DistractionAction, NavigationAction, Observation, PurchaseAction};

/// Constants for every branch of the reward table.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardTable {
    // ── Purchase ──────────────────────────────────────────────────────────
    pub buy:                    f32,
    /// Subtracted when the bought aisle is not on the list.
    pub buy_off_list_penalty:   f32,
    /// Subtracted when more items were bought than the list held.
    pub buy_overbuy_penalty:    f32,
    pub browse:                 f32,
    /// Replaces `browse` once browsed items exceed `over_browse_factor × list length`.
    pub browse_excess:          f32,
    pub over_browse_factor:     f32,
    /// Subtracted when browsing an aisle that is on the list.
    pub browse_listed_penalty:  f32,
    pub ignore:                 f32,
    /// Replaces `ignore` when the ignored aisle is on the list.
    pub ignore_listed:          f32,

    // ── Navigation ────────────────────────────────────────────────────────
    pub nearest_overall:        f32,
    /// Replaces `nearest_overall` while progress is below `early_progress`.
    pub nearest_overall_early:  f32,
    pub early_progress:         f32,
    pub nearest_in_list:        f32,
    pub next_in_list:           f32,
    /// Replaces `next_in_list` when a listed aisle is nearer than the head.
    pub next_in_list_detour:    f32,
    pub checkout:               f32,
    /// Replaces `checkout` while progress is below `checkout_progress`.
    pub checkout_early:         f32,
    pub checkout_progress:      f32,

    // ── Distraction ───────────────────────────────────────────────────────
    pub distraction_ignore:     f32,
    pub distraction_follow:     f32,
    /// Added when the distracting aisle is an offers aisle.
    pub follow_offer_bonus:     f32,
    /// Subtracted for any other distracting aisle.
    pub follow_other_penalty:   f32,
}

impl RewardTable {
    /// List-driven shopper: rewarded for buying what it came for and
    /// checking out once the list is nearly done.
    pub fn goal_oriented() -> Self {
        Self {
            buy:                   1.0,
            buy_off_list_penalty:  2.0,
            buy_overbuy_penalty:   0.5,
            browse:                0.5,
            browse_excess:         -0.5,
            over_browse_factor:    1.5,
            browse_listed_penalty: 2.0,
            ignore:                -0.25,
            ignore_listed:         -1.0,

            nearest_overall:       1.0,
            nearest_overall_early: -0.5,
            early_progress:        0.5,
            nearest_in_list:       1.0,
            next_in_list:          0.5,
            next_in_list_detour:   -0.5,
            checkout:              5.0,
            checkout_early:        -5.0,
            checkout_progress:     0.9,

            distraction_ignore:    0.5,
            distraction_follow:    1.0,
            follow_offer_bonus:    0.25,
            follow_other_penalty:  0.5,
        }
    }

    /// Drawn to offers and happy to buy off-list.
    pub fn impulse() -> Self {
        Self {
            buy_off_list_penalty:  0.5,
            buy_overbuy_penalty:   0.0,
            nearest_overall:       1.5,
            nearest_overall_early: 0.5,
            checkout_progress:     0.6,
            distraction_ignore:    -0.25,
            distraction_follow:    1.5,
            follow_offer_bonus:    1.0,
            follow_other_penalty:  0.25,
            ..Self::goal_oriented()
        }
    }

    /// Browses freely and takes its time before checking out.
    pub fn wanderer() -> Self {
        Self {
            browse:                1.0,
            browse_excess:         0.25,
            over_browse_factor:    3.0,
            browse_listed_penalty: 1.0,
            ignore:                0.0,
            nearest_overall:       1.0,
            nearest_overall_early: 0.5,
            next_in_list:          0.25,
            checkout:              3.0,
            checkout_early:        -3.0,
            distraction_ignore:    0.25,
            distraction_follow:    1.0,
            follow_other_penalty:  0.0,
            ..Self::goal_oriented()
        }
    }

    /// Score `decision` given the observation it was evaluated on.
    pub fn reward(&self, decision: Decision, obs: &Observation) -> f32 {
        match decision {
            Decision::Purchase(a)    => self.purchase_reward(a, obs),
            Decision::Navigation(a)  => self.navigation_reward(a, obs),
            Decision::Distraction(a) => self.distraction_reward(a, obs),
        }
    }

    fn purchase_reward(&self, action: PurchaseAction, obs: &Observation) -> f32 {
        let list_len = obs.list_len_at_start as f32;
        match action {
            PurchaseAction::Buy => {
                let mut r = self.buy;
                if !obs.item_in_list {
                    r -= self.buy_off_list_penalty;
                }
                if obs.total_bought as f32 > list_len {
                    r -= self.buy_overbuy_penalty;
                }
                r
            }
            PurchaseAction::Browse => {
                let mut r = self.browse;
                if obs.total_browsed as f32 > self.over_browse_factor * list_len {
                    r = self.browse_excess;
                }
                if obs.item_in_list {
                    r -= self.browse_listed_penalty;
                }
                r
            }
            PurchaseAction::Ignore => {
                if obs.item_in_list { self.ignore_listed } else { self.ignore }
            }
        }
    }

    fn navigation_reward(&self, action: NavigationAction, obs: &Observation) -> f32 {
        match action {
            NavigationAction::NearestOverall => {
                if obs.shopping_progress < self.early_progress {
                    self.nearest_overall_early
                } else {
                    self.nearest_overall
                }
            }
            NavigationAction::NearestInList => self.nearest_in_list,
            NavigationAction::NextInList => {
                if obs.dist_nearest_in_list < obs.dist_next_in_list {
                    self.next_in_list_detour
                } else {
                    self.next_in_list
                }
            }
            NavigationAction::Checkout => {
                if obs.shopping_progress < self.checkout_progress {
                    self.checkout_early
                } else {
                    self.checkout
                }
            }
        }
    }

    fn distraction_reward(&self, action: DistractionAction, obs: &Observation) -> f32 {
        match action {
            DistractionAction::Ignore => self.distraction_ignore,
            DistractionAction::Follow => {
                if obs.distracting_class == Some(AisleClass::Offers) {
                    self.distraction_follow + self.follow_offer_bonus
                } else {
                    self.distraction_follow - self.follow_other_penalty
                }
            }
        }
    }
}

impl Default for RewardTable {
    fn default() -> Self {
        Self::goal_oriented()
    }
}
