//! Per-aisle outcome counters.

use shop_core::AisleId;
use tracing::warn;

use crate::StoreCatalog;

/// What a shopper ended up doing at an aisle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AisleOutcome {
    Bought,
    Browsed,
    Ignored,
}

/// Counters for one aisle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AisleStats {
    pub bought:  u32,
    pub browsed: u32,
    pub ignored: u32,
}

impl AisleStats {
    pub fn total(&self) -> u32 {
        self.bought + self.browsed + self.ignored
    }
}

/// Bought / browsed / ignored tallies for every aisle in the catalog.
///
/// Created once per run and passed to shoppers by the simulation driver;
/// there is no global instance.
pub struct AisleLedger {
    stats: Vec<AisleStats>,
}

impl AisleLedger {
    /// One zeroed row per catalog aisle, in catalog order.
    pub fn new(catalog: &StoreCatalog) -> Self {
        Self { stats: vec![AisleStats::default(); catalog.len()] }
    }

    /// Count one outcome.  Unknown aisles are reported and ignored.
    pub fn record(&mut self, aisle: AisleId, outcome: AisleOutcome) {
        let Some(row) = self.stats.get_mut(aisle.index()) else {
            warn!(%aisle, ?outcome, "outcome recorded for an aisle missing from the ledger");
            return;
        };
        match outcome {
            AisleOutcome::Bought  => row.bought += 1,
            AisleOutcome::Browsed => row.browsed += 1,
            AisleOutcome::Ignored => row.ignored += 1,
        }
    }

    pub fn get(&self, aisle: AisleId) -> Option<&AisleStats> {
        self.stats.get(aisle.index())
    }

    /// `(aisle, stats)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (AisleId, &AisleStats)> {
        self.stats.iter().enumerate().map(|(i, s)| (AisleId(i as u16), s))
    }

    pub fn reset(&mut self) {
        self.stats.iter_mut().for_each(|s| *s = AisleStats::default());
    }
}
