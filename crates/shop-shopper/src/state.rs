//! Shopper state components.

use std::fmt;

use shop_brain::PurchaseAction;
use shop_catalog::{AisleClass, AisleOutcome};
use shop_core::{AgentRng, AisleId, StationId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShopperState {
    Enter,
    Shopping,
    Checkout,
    Exit,
}

impl fmt::Display for ShopperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShopperState::Enter    => "enter",
            ShopperState::Shopping => "shopping",
            ShopperState::Checkout => "checkout",
            ShopperState::Exit     => "exit",
        };
        f.write_str(s)
    }
}

// ── PurchaseCounters ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PurchaseCounters {
    pub total_bought:     u32,
    pub total_browsed:    u32,
    /// Indexed by [`AisleClass::index`].
    pub bought_per_class: [u32; 4],
}

impl PurchaseCounters {
    pub fn record_buy(&mut self, class: Option<AisleClass>) {
        self.total_bought += 1;
        if let Some(c) = class {
            self.bought_per_class[c.index()] += 1;
        }
    }

    pub fn record_browse(&mut self) {
        self.total_browsed += 1;
    }

    pub fn bought_from(&self, class: AisleClass) -> u32 {
        self.bought_per_class[class.index()]
    }
}

// ── AisleDistances ────────────────────────────────────────────────────────────

/// Navigation candidates, refreshed at every navigation decision point.
/// Each is `(aisle, path distance)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AisleDistances {
    /// Nearest of the aisles currently within detection radius.
    pub nearest_overall: Option<(AisleId, f32)>,
    pub nearest_in_list: Option<(AisleId, f32)>,
    /// Head of the shopping list.
    pub next_in_list:    Option<(AisleId, f32)>,
}

// ── Timed actions ─────────────────────────────────────────────────────────────

/// What happens when a timed action's countdown reaches zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionCompletion {
    Buy,
    Browse,
    Ignore,
}

impl ActionCompletion {
    /// Whole seconds the action takes: Buy 8–11, Browse 5–7, Ignore 0.
    pub fn draw_duration(self, rng: &mut AgentRng) -> f32 {
        let secs: u32 = match self {
            ActionCompletion::Buy    => rng.gen_range(8..=11),
            ActionCompletion::Browse => rng.gen_range(5..=7),
            ActionCompletion::Ignore => 0,
        };
        secs as f32
    }

    pub fn outcome(self) -> AisleOutcome {
        match self {
            ActionCompletion::Buy    => AisleOutcome::Bought,
            ActionCompletion::Browse => AisleOutcome::Browsed,
            ActionCompletion::Ignore => AisleOutcome::Ignored,
        }
    }
}

impl From<PurchaseAction> for ActionCompletion {
    fn from(a: PurchaseAction) -> Self {
        match a {
            PurchaseAction::Buy    => ActionCompletion::Buy,
            PurchaseAction::Browse => ActionCompletion::Browse,
            PurchaseAction::Ignore => ActionCompletion::Ignore,
        }
    }
}

/// A purchase action in progress at `aisle`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimedAction {
    pub aisle:      AisleId,
    pub completion: ActionCompletion,
    /// Simulated seconds left.
    pub remaining:  f32,
}

// ── CheckoutProgress ──────────────────────────────────────────────────────────

/// Checkout sub-steps.  Reset whenever the shopper leaves `Checkout`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CheckoutProgress {
    /// Assigned at most once per entry into `Checkout`.
    pub station:         Option<StationId>,
    pub destination_set: bool,
    pub queued:          bool,
}
