//! Straight-line walking navigator.

use rustc_hash::FxHashMap;
use tracing::debug;

use shop_core::{AgentId, Area, Point};

use crate::{MovementState, NavError, NavResult, Navigator, UNREACHABLE_DISTANCE};

/// Agents walk in a straight line at a constant speed.
///
/// An optional floor area models the walkable region: any point outside it is
/// unreachable, [`path_distance`][Navigator::path_distance] reports
/// [`UNREACHABLE_DISTANCE`], and destinations there are refused.
pub struct WalkingNavigator {
    /// Metres per simulated second.
    pub speed: f32,
    floor:     Option<Area>,
    states:    FxHashMap<AgentId, MovementState>,
}

impl WalkingNavigator {
    pub fn new(speed: f32) -> Self {
        Self { speed, floor: None, states: FxHashMap::default() }
    }

    /// Restrict the walkable region to `floor`.
    pub fn with_floor(mut self, floor: Area) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn state(&self, agent: AgentId) -> Option<&MovementState> {
        self.states.get(&agent)
    }

    pub fn placed_count(&self) -> usize {
        self.states.len()
    }

    fn walkable(&self, p: Point) -> bool {
        self.floor.is_none_or(|f| f.contains(p))
    }
}

impl Navigator for WalkingNavigator {
    fn place(&mut self, agent: AgentId, position: Point) {
        self.states.insert(agent, MovementState::stationary(position));
    }

    fn remove(&mut self, agent: AgentId) {
        self.states.remove(&agent);
    }

    fn position(&self, agent: AgentId) -> Option<Point> {
        self.states.get(&agent).map(|s| s.position)
    }

    fn path_distance(&self, from: Point, to: Point) -> f32 {
        if !self.walkable(from) || !self.walkable(to) {
            return UNREACHABLE_DISTANCE;
        }
        from.distance(to).min(UNREACHABLE_DISTANCE)
    }

    fn set_destination(&mut self, agent: AgentId, to: Point) -> NavResult<()> {
        if !self.walkable(to) {
            debug!(%agent, %to, "destination outside the walkable floor");
            return Err(NavError::Unreachable { agent, to });
        }
        let state = self.states.get_mut(&agent).ok_or(NavError::NotPlaced(agent))?;
        state.destination = Some(to);
        Ok(())
    }

    fn has_arrived(&self, agent: AgentId, threshold: f32) -> bool {
        self.states
            .get(&agent)
            .is_some_and(|s| s.remaining_distance() <= threshold)
    }

    fn advance(&mut self, dt_secs: f32) {
        let max_step = self.speed * dt_secs;
        for state in self.states.values_mut() {
            state.step(max_step);
        }
    }
}
