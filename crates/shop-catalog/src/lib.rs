//! `shop-catalog` — what the store contains and where.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`aisle`]    | `AisleClass`, `Aisle`                                          |
//! | [`catalog`]  | `StoreCatalog`, `StoreCatalogBuilder`, proximity queries       |
//! | [`layout`]   | `StoreLayout` — entry, exit and checkout staging area          |
//! | [`ledger`]   | `AisleLedger`, `AisleOutcome`, `AisleStats`                    |
//! | [`loader`]   | `load_catalog_csv`, `load_catalog_reader`                      |
//! | [`error`]    | `CatalogError`, `CatalogResult<T>`                             |
//!
//! Shopping lists are ordered `Vec<AisleId>`s.  Names are kept for logging
//! and reports; everything on the hot path works with ids.

pub mod aisle;
pub mod catalog;
pub mod error;
pub mod layout;
pub mod ledger;
pub mod loader;

#[cfg(test)]
mod tests;

pub use aisle::{Aisle, AisleClass};
pub use catalog::{StoreCatalog, StoreCatalogBuilder};
pub use error::{CatalogError, CatalogResult};
pub use layout::StoreLayout;
pub use ledger::{AisleLedger, AisleOutcome, AisleStats};
pub use loader::{load_catalog_csv, load_catalog_reader};
