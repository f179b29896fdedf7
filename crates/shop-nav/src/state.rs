//! Per-agent movement state.

use shop_core::Point;

/// Where an agent is and where it is heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementState {
    pub position:    Point,
    /// `None` once the agent has been stopped or has never been sent anywhere.
    pub destination: Option<Point>,
}

impl MovementState {
    #[inline]
    pub fn stationary(position: Point) -> Self {
        Self { position, destination: None }
    }

    /// Straight-line distance still to cover; zero when idle.
    #[inline]
    pub fn remaining_distance(&self) -> f32 {
        self.destination.map_or(0.0, |d| self.position.distance(d))
    }

    /// One step of at most `max_step` metres towards the destination.
    pub fn step(&mut self, max_step: f32) {
        if let Some(dest) = self.destination {
            self.position = self.position.step_towards(dest, max_step);
        }
    }
}
