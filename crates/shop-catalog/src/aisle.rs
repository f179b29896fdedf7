//! Aisle classes and aisle records.

use std::fmt;
use std::str::FromStr;

use shop_core::{AisleId, Point};

use crate::CatalogError;

/// Merchandise class of an aisle.
///
/// The discriminant is the class index fed to the policy observation vector,
/// so the order is part of the observation contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AisleClass {
    Fresh      = 0,
    Essentials = 1,
    Others     = 2,
    Offers     = 3,
}

impl AisleClass {
    pub const ALL: [AisleClass; 4] =
        [AisleClass::Fresh, AisleClass::Essentials, AisleClass::Others, AisleClass::Offers];

    /// Relative weight used when drawing shopping-list items.
    pub fn list_weight(self) -> f32 {
        match self {
            AisleClass::Fresh      => 0.9,
            AisleClass::Essentials => 0.75,
            AisleClass::Others     => 0.3,
            AisleClass::Offers     => 0.3,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AisleClass::Fresh      => "fresh",
            AisleClass::Essentials => "essentials",
            AisleClass::Others     => "others",
            AisleClass::Offers     => "offers",
        }
    }
}

impl fmt::Display for AisleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AisleClass {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fresh"      => Ok(AisleClass::Fresh),
            "essentials" => Ok(AisleClass::Essentials),
            "others"     => Ok(AisleClass::Others),
            "offers"     => Ok(AisleClass::Offers),
            other        => Err(CatalogError::UnknownClass(other.to_owned())),
        }
    }
}

/// One named, located shopping zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Aisle {
    pub id:       AisleId,
    pub name:     String,
    pub class:    AisleClass,
    /// The point shoppers walk to when they target this aisle.
    pub location: Point,
}
