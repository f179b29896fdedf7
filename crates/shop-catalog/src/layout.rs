//! Fixed key points of the store floor.

use shop_core::{Area, Point};

/// Where shoppers come in, where they go out, and where they gather before
/// picking a checkout station.
#[derive(Clone, Debug, PartialEq)]
pub struct StoreLayout {
    pub entry:         Point,
    pub exit:          Point,
    /// Staging area; each shopper walks to a random point inside it.
    pub checkout_area: Area,
}

impl StoreLayout {
    pub fn new(entry: Point, exit: Point, checkout_area: Area) -> Self {
        Self { entry, exit, checkout_area }
    }
}
