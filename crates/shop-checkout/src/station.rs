//! A single checkout station and its queue.

use std::collections::VecDeque;

use shop_core::{AgentId, Point, StationId};

/// Where a station's counter and queue sit relative to its position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StationLayout {
    pub position:          Point,
    /// Counter where the head is serviced.
    pub processing_offset: Point,
    /// First waiting slot, directly behind the counter.
    pub waiting_offset:    Point,
    /// Step from one waiting slot to the next.
    pub slot_spacing:      Point,
}

impl StationLayout {
    /// A station at `position` whose queue extends along −z.
    pub fn facing_south(position: Point) -> Self {
        Self {
            position,
            processing_offset: Point::new(0.0, 0.0, -1.0),
            waiting_offset:    Point::new(0.0, 0.0, -3.0),
            slot_spacing:      Point::new(0.0, 0.0, -1.5),
        }
    }
}

/// A shopper standing in a checkout queue.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QueuedShopper {
    pub agent:        AgentId,
    /// Drives the service time once the shopper reaches the counter.
    pub items_bought: u32,
}

/// What the station is doing with its queue head.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProcessingPhase {
    /// Head is walking to the counter.
    Approaching,
    /// Head is at the counter; `remaining` of `total` simulated seconds to go.
    Servicing { remaining: f32, total: f32 },
    /// Counter is unreachable for the head; it leaves unserviced next tick.
    Released,
}

pub struct CheckoutStation {
    pub id:     StationId,
    pub layout: StationLayout,
    pub(crate) queue: VecDeque<QueuedShopper>,
    /// `Some` while the head is being processed.
    pub(crate) phase: Option<ProcessingPhase>,
}

impl CheckoutStation {
    pub fn new(id: StationId, layout: StationLayout) -> Self {
        Self { id, layout, queue: VecDeque::new(), phase: None }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.layout.position
    }

    pub fn processing_location(&self) -> Point {
        self.layout.position + self.layout.processing_offset
    }

    /// Where a newly assigned shopper should walk: the slot behind the last
    /// person in line (the first slot when the queue is empty).
    pub fn waiting_location(&self) -> Point {
        let base = self.layout.position + self.layout.waiting_offset;
        match self.queue.len() {
            0 => base,
            n => base + self.layout.slot_spacing * (n - 1) as f32,
        }
    }

    /// Target for queue index `i`: the counter for the head, otherwise the
    /// `i`-th waiting slot.
    pub fn slot_location(&self, i: usize) -> Point {
        if i == 0 {
            return self.processing_location();
        }
        self.layout.position + self.layout.waiting_offset + self.layout.slot_spacing * (i - 1) as f32
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn head(&self) -> Option<AgentId> {
        self.queue.front().map(|q| q.agent)
    }

    pub fn is_processing(&self) -> bool {
        self.phase.is_some()
    }

    pub fn phase(&self) -> Option<ProcessingPhase> {
        self.phase
    }

    /// Queued shoppers, head first.
    pub fn queued(&self) -> impl Iterator<Item = &QueuedShopper> {
        self.queue.iter()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.queue.iter().any(|q| q.agent == agent)
    }
}
