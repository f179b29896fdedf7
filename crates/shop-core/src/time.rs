//! Simulation time model.
//!
//! Time advances in whole `Tick`s.  Each tick represents a fixed slice of
//! simulated seconds (`tick_duration_secs`, typically a fraction of a second)
//! so every timer in the simulation, be it a purchase in progress or a
//! checkout service, is a plain `f32` countdown decremented once per tick.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Maps tick counts to simulated seconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated seconds represented by one tick.
    pub tick_duration_secs: f32,
    /// The current tick, advanced by [`SimClock::advance`] each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: f32) -> Self {
        Self { tick_duration_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs as f64
    }

    /// How many ticks span `secs` simulated seconds (rounds up).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.tick_duration_secs).ceil() as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.elapsed_secs().max(0.0) as u64;
        write!(f, "{} ({:02}:{:02})", self.current_tick, total / 60, total % 60)
    }
}
