//! Synthetic single-floor supermarket used when no catalog file is given.
//!
//! ```text
//!   z
//!  30 ┤         [S0]        [S1]        [S2]          checkout stations
//!  22 ┤         ··········staging··········
//!  16 ┤  Clearance Snacks   Drinks   Frozen   Dairy
//!  10 ┤  Rice      Pasta    Canned   Cereal   Bakery
//!   4 ┤  Fruit     Veg      Meat     Fish     Offers
//!   0 ┤              exit ◀─────── entry
//!     └──┬─────────┬────────┬────────┬────────┬──── x
//!       -12       -6        0        6       12
//! ```

use std::io::Cursor;

use anyhow::Result;

use shop_catalog::{StoreCatalog, StoreLayout, load_catalog_reader};
use shop_checkout::StationLayout;
use shop_core::{Area, Point};

const AISLES_CSV: &str = "\
name,class,x,y,z\n\
Fruit,fresh,-12.0,0.0,4.0\n\
Vegetables,fresh,-6.0,0.0,4.0\n\
Meat,fresh,0.0,0.0,4.0\n\
Fish,fresh,6.0,0.0,4.0\n\
Weekly Offers,offers,12.0,0.0,4.0\n\
Rice,essentials,-12.0,0.0,10.0\n\
Pasta,essentials,-6.0,0.0,10.0\n\
Canned Goods,essentials,0.0,0.0,10.0\n\
Cereal,essentials,6.0,0.0,10.0\n\
Bakery,fresh,12.0,0.0,10.0\n\
Clearance,offers,-12.0,0.0,16.0\n\
Snacks,others,-6.0,0.0,16.0\n\
Drinks,others,0.0,0.0,16.0\n\
Frozen,essentials,6.0,0.0,16.0\n\
Dairy,fresh,12.0,0.0,16.0\n\
";

pub fn catalog() -> Result<StoreCatalog> {
    Ok(load_catalog_reader(Cursor::new(AISLES_CSV))?)
}

pub fn layout() -> StoreLayout {
    StoreLayout::new(
        Point::new(3.0, 0.0, 0.0),
        Point::new(-6.0, 0.0, 0.0),
        Area::new(Point::new(0.0, 0.0, 22.0), Point::new(8.0, 0.0, 1.5)),
    )
}

pub fn stations() -> Vec<StationLayout> {
    [-8.0, 0.0, 8.0]
        .into_iter()
        .map(|x| StationLayout::facing_south(Point::new(x, 0.0, 30.0)))
        .collect()
}

/// Walkable region: the whole shop floor plus a margin around the doors.
pub fn floor() -> Area {
    Area::new(Point::new(0.0, 0.0, 15.0), Point::new(16.0, 1.0, 17.0))
}
