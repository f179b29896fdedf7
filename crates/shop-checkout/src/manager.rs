//! `CheckoutManager` — every station's queue and service loop.
//!
//! The manager is the only writer of station queues.  Shoppers call
//! [`enqueue`][CheckoutManager::enqueue] once they reach their waiting slot;
//! the driver calls [`tick`][CheckoutManager::tick] once per tick and hands
//! each returned [`CheckoutDone`] back to the shopper it names.

use tracing::{debug, warn};

use shop_core::{AgentId, Point, SimRng, StationId};
use shop_nav::{NavError, Navigator};

use crate::{
    CheckoutError, CheckoutResult, CheckoutStation, ProcessingPhase, QueuedShopper, StationLayout,
    select_station,
};

/// Service time when nothing was bought.
const EMPTY_BASKET_SECS: f32 = 2.0;
/// Per-item service time is uniform in `[MIN, MAX)` seconds.
const ITEM_SECS_MIN: f32 = 1.0;
const ITEM_SECS_MAX: f32 = 3.0;

/// A shopper whose checkout just finished.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CheckoutDone {
    pub station:      StationId,
    pub agent:        AgentId,
    pub service_secs: f32,
}

pub struct CheckoutManager {
    stations: Vec<CheckoutStation>,
    rng:      SimRng,
    /// Head counts as at the counter within this distance.
    arrival_distance: f32,
}

impl CheckoutManager {
    pub fn new(rng: SimRng, arrival_distance: f32) -> Self {
        Self { stations: Vec::new(), rng, arrival_distance }
    }

    pub fn add_station(&mut self, layout: StationLayout) -> StationId {
        let id = StationId(self.stations.len() as u16);
        self.stations.push(CheckoutStation::new(id, layout));
        id
    }

    pub fn stations(&self) -> &[CheckoutStation] {
        &self.stations
    }

    pub fn station(&self, id: StationId) -> Option<&CheckoutStation> {
        self.stations.get(id.index())
    }

    /// Least busy, then nearest station to `from`.
    pub fn select_station(&self, from: Point) -> Option<StationId> {
        select_station(&self.stations, from)
    }

    /// Append `agent` to `station`'s queue, move everyone behind the head up,
    /// and start processing if the station was idle.
    pub fn enqueue(
        &mut self,
        station:      StationId,
        agent:        AgentId,
        items_bought: u32,
        nav:          &mut dyn Navigator,
    ) -> CheckoutResult<()> {
        let st = self
            .stations
            .get_mut(station.index())
            .ok_or(CheckoutError::UnknownStation(station))?;
        if st.contains(agent) {
            return Err(CheckoutError::AlreadyQueued { agent, station });
        }
        st.queue.push_back(QueuedShopper { agent, items_bought });
        debug!(%station, %agent, queue_len = st.queue_len(), "shopper joined checkout queue");

        if st.phase.is_none() {
            start_head(st, nav);
        }
        reposition_waiting(st, nav);
        Ok(())
    }

    /// Advance every station's service loop by `dt_secs`.
    pub fn tick(&mut self, dt_secs: f32, nav: &mut dyn Navigator) -> Vec<CheckoutDone> {
        let mut done = Vec::new();
        for st in &mut self.stations {
            if st.phase.is_none() {
                if st.queue.is_empty() {
                    continue;
                }
                start_head(st, nav);
                reposition_waiting(st, nav);
            }
            let Some(head) = st.queue.front().copied() else {
                st.phase = None;
                continue;
            };

            match st.phase {
                Some(ProcessingPhase::Approaching) => {
                    let Some(pos) = nav.position(head.agent) else {
                        warn!(station = %st.id, agent = %head.agent, "checkout head has no navigation entry; dropping");
                        st.queue.pop_front();
                        st.phase = None;
                        continue;
                    };
                    if pos.distance(st.processing_location()) <= self.arrival_distance {
                        let secs = service_time(&mut self.rng, head.items_bought);
                        st.phase = Some(ProcessingPhase::Servicing { remaining: secs, total: secs });
                        debug!(station = %st.id, agent = %head.agent, secs, "servicing");
                    }
                }
                Some(ProcessingPhase::Servicing { remaining, total }) => {
                    let remaining = remaining - dt_secs;
                    if remaining > 0.0 {
                        st.phase = Some(ProcessingPhase::Servicing { remaining, total });
                        continue;
                    }
                    st.queue.pop_front();
                    st.phase = None;
                    done.push(CheckoutDone { station: st.id, agent: head.agent, service_secs: total });
                    if !st.queue.is_empty() {
                        start_head(st, nav);
                        reposition_waiting(st, nav);
                    }
                }
                Some(ProcessingPhase::Released) => {
                    st.queue.pop_front();
                    st.phase = None;
                    done.push(CheckoutDone { station: st.id, agent: head.agent, service_secs: 0.0 });
                    if !st.queue.is_empty() {
                        start_head(st, nav);
                        reposition_waiting(st, nav);
                    }
                }
                None => {}
            }
        }
        done
    }

    /// Remove `agent` from whichever queue holds it.  If it was a head, the
    /// station restarts with the next shopper on its next tick.
    pub fn forget(&mut self, agent: AgentId) {
        for st in &mut self.stations {
            let Some(i) = st.queue.iter().position(|q| q.agent == agent) else {
                continue;
            };
            st.queue.remove(i);
            if i == 0 {
                st.phase = None;
            }
        }
    }

    /// Total shoppers queued across all stations.
    pub fn total_queued(&self) -> usize {
        self.stations.iter().map(CheckoutStation::queue_len).sum()
    }
}

/// Send the head to the counter and mark it `Approaching`, or `Released`
/// when the counter cannot be reached.
fn start_head(st: &mut CheckoutStation, nav: &mut dyn Navigator) {
    let Some(head) = st.queue.front().copied() else {
        return;
    };
    st.phase = match nav.set_destination(head.agent, st.processing_location()) {
        Ok(()) => Some(ProcessingPhase::Approaching),
        Err(e @ NavError::Unreachable { .. }) => {
            warn!(station = %st.id, agent = %head.agent, error = %e, "counter unreachable; releasing head unserviced");
            Some(ProcessingPhase::Released)
        }
        Err(e) => {
            debug!(station = %st.id, agent = %head.agent, error = %e, "could not send head to counter");
            Some(ProcessingPhase::Approaching)
        }
    };
}

/// Move every non-head shopper to the slot matching its queue index.
fn reposition_waiting(st: &CheckoutStation, nav: &mut dyn Navigator) {
    for (i, q) in st.queue.iter().enumerate().skip(1) {
        if let Err(e) = nav.set_destination(q.agent, st.slot_location(i)) {
            debug!(station = %st.id, agent = %q.agent, error = %e, "could not move shopper up");
        }
    }
}

fn service_time(rng: &mut SimRng, items_bought: u32) -> f32 {
    if items_bought == 0 {
        return EMPTY_BASKET_SECS;
    }
    (0..items_bought).map(|_| rng.gen_range(ITEM_SECS_MIN..ITEM_SECS_MAX)).sum()
}
