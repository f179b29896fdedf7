//! The `Navigator` trait — the seam between decision logic and movement.

use shop_core::{AgentId, Point};

use crate::NavResult;

/// Path length reported for unreachable targets.  Callers rank it as the
/// worst candidate; it is never an error.
pub const UNREACHABLE_DISTANCE: f32 = 9999.0;

/// Black-box movement oracle.
///
/// The simulation driver calls [`advance`][Self::advance] once per tick;
/// shoppers and checkout stations only issue destinations and poll arrival.
pub trait Navigator {
    /// Put `agent` on the floor at `position` (spawn).  Replaces any prior
    /// state for that agent.
    fn place(&mut self, agent: AgentId, position: Point);

    /// Take `agent` off the floor (retirement).
    fn remove(&mut self, agent: AgentId);

    /// Current position, or `None` if the agent is not placed.
    fn position(&self, agent: AgentId) -> Option<Point>;

    /// Walking distance between two points, or [`UNREACHABLE_DISTANCE`].
    fn path_distance(&self, from: Point, to: Point) -> f32;

    /// Start moving `agent` towards `to`.
    fn set_destination(&mut self, agent: AgentId, to: Point) -> NavResult<()>;

    /// `true` when the agent is placed and within `threshold` of its current
    /// destination (or idle).  Issuing a destination does not count as
    /// arriving.
    fn has_arrived(&self, agent: AgentId, threshold: f32) -> bool;

    /// Move every agent forward by `dt_secs` simulated seconds.
    fn advance(&mut self, dt_secs: f32);
}
