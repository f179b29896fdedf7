//! Per-policy episode bookkeeping.

/// Counts delivered decisions and signals when an episode should end.
///
/// Reaching the threshold only marks the rollover as *pending*; it happens on
/// the first [`try_rollover`][Self::try_rollover] call made while no
/// evaluation is in flight.
#[derive(Clone, Debug)]
pub struct EpisodeCounter {
    threshold:       u32,
    delivered:       u32,
    pending:         bool,
    completed:       u32,
    total_delivered: u64,
}

impl EpisodeCounter {
    /// A threshold of zero is treated as one.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold:       threshold.max(1),
            delivered:       0,
            pending:         false,
            completed:       0,
            total_delivered: 0,
        }
    }

    /// Count one delivered decision.
    pub fn record_delivery(&mut self) {
        self.delivered += 1;
        self.total_delivered += 1;
        if self.delivered >= self.threshold {
            self.pending = true;
        }
    }

    /// Reset the counter if a rollover is pending and nothing is in flight.
    /// Returns `true` exactly once per episode.
    pub fn try_rollover(&mut self, in_flight: bool) -> bool {
        if !self.pending || in_flight {
            return false;
        }
        self.delivered = 0;
        self.pending = false;
        self.completed += 1;
        true
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Decisions delivered since the last rollover.
    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of finished episodes.
    pub fn completed(&self) -> u32 {
        self.completed
    }

    pub fn total_delivered(&self) -> u64 {
        self.total_delivered
    }
}
