//! Decision categories and the typed actions a policy can choose.
//!
//! Policies emit one raw `u8` per category (an [`ActionTriple`]); only the
//! component for the category being evaluated is meaningful.  The raw values
//! are converted into typed actions here, and anything out of range is
//! rejected rather than silently mapped.

use std::fmt;

// ── DecisionCategory ──────────────────────────────────────────────────────────

/// The three independent decision axes a shopper may ask about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DecisionCategory {
    Purchase    = 0,
    Navigation  = 1,
    Distraction = 2,
}

impl DecisionCategory {
    pub const ALL: [DecisionCategory; 3] =
        [DecisionCategory::Purchase, DecisionCategory::Navigation, DecisionCategory::Distraction];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of discrete actions available in this category.
    pub fn action_count(self) -> u8 {
        match self {
            DecisionCategory::Purchase    => PurchaseAction::COUNT,
            DecisionCategory::Navigation  => NavigationAction::COUNT,
            DecisionCategory::Distraction => DistractionAction::COUNT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DecisionCategory::Purchase    => "Purchase",
            DecisionCategory::Navigation  => "Navigation",
            DecisionCategory::Distraction => "Distraction",
        }
    }
}

impl fmt::Display for DecisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Typed actions ─────────────────────────────────────────────────────────────

/// What to do at the active aisle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PurchaseAction {
    Buy    = 0,
    Browse = 1,
    Ignore = 2,
}

impl PurchaseAction {
    pub const COUNT: u8 = 3;

    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(PurchaseAction::Buy),
            1 => Some(PurchaseAction::Browse),
            2 => Some(PurchaseAction::Ignore),
            _ => None,
        }
    }
}

/// Where to head next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    /// Nearest aisle currently noticed, listed or not.
    NearestOverall = 0,
    /// Nearest aisle still on the shopping list.
    NearestInList  = 1,
    /// The head of the shopping list.
    NextInList     = 2,
    Checkout       = 3,
}

impl NavigationAction {
    pub const COUNT: u8 = 4;

    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(NavigationAction::NearestOverall),
            1 => Some(NavigationAction::NearestInList),
            2 => Some(NavigationAction::NextInList),
            3 => Some(NavigationAction::Checkout),
            _ => None,
        }
    }
}

/// Whether to follow an aisle that just caught the shopper's eye.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DistractionAction {
    Ignore = 0,
    Follow = 1,
}

impl DistractionAction {
    pub const COUNT: u8 = 2;

    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(DistractionAction::Ignore),
            1 => Some(DistractionAction::Follow),
            _ => None,
        }
    }
}

// ── Decision ──────────────────────────────────────────────────────────────────

/// A delivered decision, tagged by category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Purchase(PurchaseAction),
    Navigation(NavigationAction),
    Distraction(DistractionAction),
}

impl Decision {
    pub fn category(self) -> DecisionCategory {
        match self {
            Decision::Purchase(_)    => DecisionCategory::Purchase,
            Decision::Navigation(_)  => DecisionCategory::Navigation,
            Decision::Distraction(_) => DecisionCategory::Distraction,
        }
    }

    /// The raw action index within its category.
    pub fn raw(self) -> u8 {
        match self {
            Decision::Purchase(a)    => a as u8,
            Decision::Navigation(a)  => a as u8,
            Decision::Distraction(a) => a as u8,
        }
    }
}

// ── ActionTriple ──────────────────────────────────────────────────────────────

/// Raw policy output: one discrete action per category, always all three.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ActionTriple {
    pub purchase:    u8,
    pub navigation:  u8,
    pub distraction: u8,
}

impl ActionTriple {
    pub const fn new(purchase: u8, navigation: u8, distraction: u8) -> Self {
        Self { purchase, navigation, distraction }
    }

    pub fn component(&self, category: DecisionCategory) -> u8 {
        match category {
            DecisionCategory::Purchase    => self.purchase,
            DecisionCategory::Navigation  => self.navigation,
            DecisionCategory::Distraction => self.distraction,
        }
    }

    /// Typed decision for `category`, or `None` if that component is out of
    /// range.
    pub fn decision_for(&self, category: DecisionCategory) -> Option<Decision> {
        let raw = self.component(category);
        match category {
            DecisionCategory::Purchase    => PurchaseAction::from_raw(raw).map(Decision::Purchase),
            DecisionCategory::Navigation  => NavigationAction::from_raw(raw).map(Decision::Navigation),
            DecisionCategory::Distraction => DistractionAction::from_raw(raw).map(Decision::Distraction),
        }
    }
}
