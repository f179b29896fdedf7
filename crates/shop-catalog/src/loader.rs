//! CSV catalog loader.
//!
//! # CSV format
//!
//! One row per aisle.  Names must be unique; `class` is one of `fresh`,
//! `essentials`, `others`, `offers` (case-insensitive).
//!
//! ```csv
//! name,class,x,y,z
//! Bakery,fresh,2.0,0.0,4.0
//! Pasta,essentials,6.0,0.0,4.0
//! Weekly Deals,offers,10.0,0.0,1.5
//! ```
//!
//! Aisle ids follow row order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use shop_core::Point;

use crate::{AisleClass, CatalogError, CatalogResult, StoreCatalog, StoreCatalogBuilder};

#[derive(Deserialize)]
struct AisleRecord {
    name:  String,
    class: String,
    x:     f32,
    y:     f32,
    z:     f32,
}

/// Load a [`StoreCatalog`] from a CSV file.
pub fn load_catalog_csv(path: &Path) -> CatalogResult<StoreCatalog> {
    let file = std::fs::File::open(path)?;
    load_catalog_reader(file)
}

/// Load a [`StoreCatalog`] from any `Read` source (file, `Cursor`, …).
pub fn load_catalog_reader<R: Read>(reader: R) -> CatalogResult<StoreCatalog> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut builder = StoreCatalogBuilder::new();

    for (line, result) in rdr.deserialize::<AisleRecord>().enumerate() {
        let rec = result?;
        if rec.name.is_empty() {
            return Err(CatalogError::Parse(format!("row {}: empty aisle name", line + 1)));
        }
        let class: AisleClass = rec.class.parse()?;
        builder.add_aisle(rec.name, class, Point::new(rec.x, rec.y, rec.z))?;
    }

    Ok(builder.build())
}
