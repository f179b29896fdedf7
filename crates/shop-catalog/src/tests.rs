//! Unit tests for shop-catalog.

use shop_core::{AgentId, AgentRng, Point};

use crate::{AisleClass, StoreCatalog, StoreCatalogBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One aisle per class laid out along the x axis, 5 m apart.
fn four_aisle_catalog() -> StoreCatalog {
    let mut b = StoreCatalogBuilder::new();
    b.add_aisle("Produce",  AisleClass::Fresh,      Point::new(0.0,  0.0, 0.0)).unwrap();
    b.add_aisle("Pantry",   AisleClass::Essentials, Point::new(5.0,  0.0, 0.0)).unwrap();
    b.add_aisle("Hardware", AisleClass::Others,     Point::new(10.0, 0.0, 0.0)).unwrap();
    b.add_aisle("Deals",    AisleClass::Offers,     Point::new(15.0, 0.0, 0.0)).unwrap();
    b.build()
}

#[cfg(test)]
mod catalog_tests {
    use shop_core::AisleId;

    use super::*;

    #[test]
    fn lookups_by_name_and_id() {
        let c = four_aisle_catalog();
        assert_eq!(c.len(), 4);
        let id = c.id_of("Hardware").unwrap();
        assert_eq!(id, AisleId(2));
        assert_eq!(c.name_of(id), Some("Hardware"));
        assert_eq!(c.class_of(id), Some(AisleClass::Others));
        assert_eq!(c.location_of(id), Some(Point::new(10.0, 0.0, 0.0)));
        assert_eq!(c.id_of("Nowhere"), None);
        assert_eq!(c.location_of(AisleId(99)), None);
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut b = StoreCatalogBuilder::new();
        b.add_aisle("Dairy", AisleClass::Fresh, Point::ORIGIN).unwrap();
        assert!(b.add_aisle("Dairy", AisleClass::Offers, Point::ORIGIN).is_err());
    }

    #[test]
    fn aisles_within_is_sorted_by_distance() {
        let c = four_aisle_catalog();
        let hits = c.aisles_within(Point::new(6.0, 0.0, 0.0), 5.0);
        assert_eq!(hits, vec![AisleId(1), AisleId(2)]);
        let wide = c.aisles_within(Point::new(6.0, 0.0, 0.0), 6.5);
        assert_eq!(wide, vec![AisleId(1), AisleId(2), AisleId(0)]);
        assert!(c.aisles_within(Point::new(100.0, 0.0, 0.0), 5.0).is_empty());
    }

    #[test]
    fn shopping_list_length_within_bounds() {
        let c = four_aisle_catalog();
        let mut rng = AgentRng::new(7, AgentId(0));
        for _ in 0..200 {
            let list = c.random_shopping_list(&mut rng, 1, 12);
            assert!((1..=12).contains(&list.len()));
            assert!(list.iter().all(|a| c.get(*a).is_some()));
        }
    }

    #[test]
    fn shopping_list_follows_class_weights() {
        let c = four_aisle_catalog();
        let mut rng = AgentRng::new(11, AgentId(3));
        let mut per_class = [0usize; 4];
        for _ in 0..2_000 {
            for a in c.random_shopping_list(&mut rng, 5, 5) {
                per_class[c.class_of(a).unwrap().index()] += 1;
            }
        }
        let total: usize = per_class.iter().sum();
        let fresh = per_class[0] as f32 / total as f32;
        let offers = per_class[3] as f32 / total as f32;
        // Expected shares: 0.9 / 2.25 = 0.4 and 0.3 / 2.25 ≈ 0.133.
        assert!((fresh - 0.4).abs() < 0.03, "fresh share {fresh}");
        assert!((offers - 0.1333).abs() < 0.03, "offers share {offers}");
    }

    #[test]
    fn missing_class_shortens_list() {
        let mut b = StoreCatalogBuilder::new();
        b.add_aisle("Only Fresh", AisleClass::Fresh, Point::ORIGIN).unwrap();
        let c = b.build();
        let mut rng = AgentRng::new(3, AgentId(1));
        let mut saw_short = false;
        for _ in 0..100 {
            let list = c.random_shopping_list(&mut rng, 8, 8);
            assert!(list.len() <= 8);
            saw_short |= list.len() < 8;
        }
        assert!(saw_short);
    }
}

#[cfg(test)]
mod ledger_tests {
    use shop_core::AisleId;

    use super::*;
    use crate::{AisleLedger, AisleOutcome};

    #[test]
    fn records_each_outcome() {
        let c = four_aisle_catalog();
        let mut ledger = AisleLedger::new(&c);
        ledger.record(AisleId(0), AisleOutcome::Bought);
        ledger.record(AisleId(0), AisleOutcome::Browsed);
        ledger.record(AisleId(0), AisleOutcome::Bought);
        ledger.record(AisleId(3), AisleOutcome::Ignored);

        let s = ledger.get(AisleId(0)).unwrap();
        assert_eq!((s.bought, s.browsed, s.ignored), (2, 1, 0));
        assert_eq!(ledger.get(AisleId(3)).unwrap().ignored, 1);
        assert_eq!(ledger.iter().map(|(_, s)| s.total()).sum::<u32>(), 4);
    }

    #[test]
    fn unknown_aisle_is_ignored() {
        let c = four_aisle_catalog();
        let mut ledger = AisleLedger::new(&c);
        ledger.record(AisleId(42), AisleOutcome::Bought);
        assert_eq!(ledger.iter().map(|(_, s)| s.total()).sum::<u32>(), 0);
    }

    #[test]
    fn reset_zeroes_counters() {
        let c = four_aisle_catalog();
        let mut ledger = AisleLedger::new(&c);
        ledger.record(AisleId(1), AisleOutcome::Bought);
        ledger.reset();
        assert_eq!(ledger.get(AisleId(1)).unwrap().total(), 0);
    }
}

#[cfg(test)]
mod loader_tests {
    use std::io::{Cursor, Write};

    use crate::{AisleClass, CatalogError, load_catalog_csv, load_catalog_reader};

    const CSV: &str = "\
name,class,x,y,z\n\
Bakery,fresh,2.0,0.0,4.0\n\
Pasta, Essentials ,6.0,0.0,4.0\n\
Weekly Deals,offers,10.0,0.0,1.5\n\
";

    #[test]
    fn parses_rows_in_order() {
        let c = load_catalog_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.aisles()[1].name, "Pasta");
        assert_eq!(c.aisles()[1].class, AisleClass::Essentials);
        assert_eq!(c.aisles_of_class(AisleClass::Offers).len(), 1);
    }

    #[test]
    fn unknown_class_is_error() {
        let bad = "name,class,x,y,z\nToys,gadgets,0,0,0\n";
        let err = load_catalog_reader(Cursor::new(bad)).err().unwrap();
        assert!(matches!(err, CatalogError::UnknownClass(_)));
    }

    #[test]
    fn duplicate_name_is_error() {
        let bad = "name,class,x,y,z\nA,fresh,0,0,0\nA,offers,1,0,0\n";
        assert!(matches!(
            load_catalog_reader(Cursor::new(bad)).err().unwrap(),
            CatalogError::DuplicateAisle(_)
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let c = load_catalog_csv(file.path()).unwrap();
        assert_eq!(c.id_of("Bakery").map(|id| id.0), Some(0));
    }
}
