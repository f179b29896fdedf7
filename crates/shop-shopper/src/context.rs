//! Collaborators a shopper borrows for one tick.

use shop_brain::ShopperBrain;
use shop_catalog::{AisleLedger, StoreCatalog, StoreLayout};
use shop_checkout::CheckoutManager;
use shop_core::SimConfig;
use shop_nav::Navigator;

/// Everything [`Shopper::tick`][crate::Shopper::tick] may read or touch.
///
/// Built by the driver for each shopper in turn; `brain` is the scheduler
/// of that shopper's brain kind.
pub struct ShopperContext<'a> {
    pub config:   &'a SimConfig,
    pub catalog:  &'a StoreCatalog,
    pub layout:   &'a StoreLayout,
    pub nav:      &'a mut dyn Navigator,
    pub brain:    &'a mut dyn ShopperBrain,
    pub checkout: &'a mut CheckoutManager,
    pub ledger:   &'a mut AisleLedger,
}
