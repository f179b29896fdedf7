//! Station selection.

use shop_core::{Point, StationId};

use crate::CheckoutStation;

/// Pick the station with the shortest queue; among equally short queues, the
/// one nearest to `from` in a straight line.  Exact distance ties go to the
/// station listed first.  `None` only when `stations` is empty.
pub fn select_station(stations: &[CheckoutStation], from: Point) -> Option<StationId> {
    let min_queue = stations.iter().map(CheckoutStation::queue_len).min()?;

    let mut best: Option<(StationId, f32)> = None;
    for station in stations.iter().filter(|s| s.queue_len() == min_queue) {
        let d = from.distance(station.position());
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((station.id, d));
        }
    }
    best.map(|(id, _)| id)
}
