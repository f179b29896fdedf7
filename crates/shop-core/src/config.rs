//! Top-level simulation configuration.

use crate::{ShopError, ShopResult, SimClock};

/// Tunables shared by every subsystem.
///
/// Typically built with `SimConfig::default()` and a few overrides, or loaded
/// from a TOML file by the application crate (enable the `serde` feature).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated seconds per tick.
    pub tick_duration_secs: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Distance at which a shopper counts as "arrived" at a destination.
    pub stopping_distance: f32,

    /// Distance at which the checkout head counts as standing at the counter.
    pub processing_stopping_distance: f32,

    /// Shopper walking speed in metres per simulated second.
    pub walk_speed: f32,

    /// Radius within which aisles are "noticed" by a shopper.  Noticed aisles
    /// are the candidates for "nearest overall" and trigger distractions.
    pub detection_radius: f32,

    /// Inclusive bounds on the number of items in a fresh shopping list.
    pub shopping_list_min: usize,
    pub shopping_list_max: usize,

    /// Delivered decisions per policy after which an episode ends.
    pub episode_threshold: u32,

    /// Interval, in simulated seconds, between recorded path points.
    pub path_record_interval_secs: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:           0.1,
            total_ticks:                  36_000,
            seed:                         42,
            stopping_distance:            1.0,
            processing_stopping_distance: 2.5,
            walk_speed:                   1.4,
            detection_radius:             4.0,
            shopping_list_min:            1,
            shopping_list_max:            12,
            episode_threshold:            50,
            path_record_interval_secs:    1.0,
        }
    }
}

impl SimConfig {
    /// Reject configurations the tick loop cannot run with.
    pub fn validate(&self) -> ShopResult<()> {
        if !(self.tick_duration_secs > 0.0) {
            return Err(ShopError::Config(format!(
                "tick_duration_secs must be positive, got {}",
                self.tick_duration_secs
            )));
        }
        if self.shopping_list_min > self.shopping_list_max {
            return Err(ShopError::Config(format!(
                "shopping_list_min ({}) exceeds shopping_list_max ({})",
                self.shopping_list_min, self.shopping_list_max
            )));
        }
        if self.episode_threshold == 0 {
            return Err(ShopError::Config("episode_threshold must be at least 1".into()));
        }
        if self.stopping_distance < 0.0 || self.processing_stopping_distance < 0.0 {
            return Err(ShopError::Config("stopping distances must not be negative".into()));
        }
        if !(self.walk_speed > 0.0) {
            return Err(ShopError::Config("walk_speed must be positive".into()));
        }
        if !(self.detection_radius >= 0.0) || !self.detection_radius.is_finite() {
            return Err(ShopError::Config(format!(
                "detection_radius must be finite and not negative, got {}",
                self.detection_radius
            )));
        }
        if !(self.path_record_interval_secs > 0.0) || !self.path_record_interval_secs.is_finite() {
            return Err(ShopError::Config(format!(
                "path_record_interval_secs must be finite and positive, got {}",
                self.path_record_interval_secs
            )));
        }
        Ok(())
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}
