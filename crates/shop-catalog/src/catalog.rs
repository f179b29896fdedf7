//! The store catalog and its builder.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over aisle locations answers "which aisles are
//! within `r` metres of this shopper" in O(log n).  That query plays the role
//! of a shopper's field of view: it produces the candidates for the
//! "nearest aisle overall" navigation choice and the distraction triggers.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use shop_core::{AgentRng, AisleId, Point};

use crate::{Aisle, AisleClass, CatalogError, CatalogResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct AisleEntry {
    point: [f32; 3],
    id:    AisleId,
}

impl RTreeObject for AisleEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AisleEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

#[inline]
fn as_array(p: Point) -> [f32; 3] {
    [p.x, p.y, p.z]
}

// ── StoreCatalog ──────────────────────────────────────────────────────────────

/// All aisles of the store, indexed by id, name, class and location.
///
/// Immutable once built; construct with [`StoreCatalogBuilder`] or
/// [`load_catalog_csv`][crate::load_catalog_csv].
pub struct StoreCatalog {
    aisles:   Vec<Aisle>,
    by_name:  FxHashMap<String, AisleId>,
    by_class: [Vec<AisleId>; 4],
    index:    RTree<AisleEntry>,
}

impl StoreCatalog {
    pub fn len(&self) -> usize {
        self.aisles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aisles.is_empty()
    }

    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    pub fn get(&self, id: AisleId) -> Option<&Aisle> {
        self.aisles.get(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<AisleId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: AisleId) -> Option<&str> {
        self.get(id).map(|a| a.name.as_str())
    }

    pub fn location_of(&self, id: AisleId) -> Option<Point> {
        self.get(id).map(|a| a.location)
    }

    pub fn class_of(&self, id: AisleId) -> Option<AisleClass> {
        self.get(id).map(|a| a.class)
    }

    pub fn aisles_of_class(&self, class: AisleClass) -> &[AisleId] {
        &self.by_class[class.index()]
    }

    /// Draw a fresh shopping list of `min..=max` items.
    ///
    /// Each item first picks a class proportionally to
    /// [`AisleClass::list_weight`], then a uniform aisle of that class.  A
    /// draw that lands on a class with no aisles produces no item, so the
    /// list can come out shorter than the drawn length.  Duplicates are
    /// allowed.
    pub fn random_shopping_list(&self, rng: &mut AgentRng, min: usize, max: usize) -> Vec<AisleId> {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let count = rng.gen_range(lo..=hi);
        let weights: Vec<f32> = AisleClass::ALL.iter().map(|c| c.list_weight()).collect();

        let mut list = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(class_idx) = rng.weighted_index(&weights) else { break };
            let class = AisleClass::ALL[class_idx];
            if let Some(&aisle) = rng.choose(self.aisles_of_class(class)) {
                list.push(aisle);
            }
        }
        list
    }

    /// Aisles whose location lies within `radius` of `pos`, nearest first.
    pub fn aisles_within(&self, pos: Point, radius: f32) -> Vec<AisleId> {
        let query = as_array(pos);
        let mut hits: Vec<(f32, AisleId)> = self
            .index
            .locate_within_distance(query, radius * radius)
            .map(|e| (e.distance_2(&query), e.id))
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }
}

// ── StoreCatalogBuilder ───────────────────────────────────────────────────────

/// Incremental builder for [`StoreCatalog`].
///
/// ```rust
/// use shop_catalog::{AisleClass, StoreCatalogBuilder};
/// use shop_core::Point;
///
/// let mut b = StoreCatalogBuilder::new();
/// b.add_aisle("Bakery", AisleClass::Fresh, Point::new(2.0, 0.0, 4.0)).unwrap();
/// let catalog = b.build();
/// assert_eq!(catalog.len(), 1);
/// ```
#[derive(Default)]
pub struct StoreCatalogBuilder {
    aisles:  Vec<Aisle>,
    by_name: FxHashMap<String, AisleId>,
}

impl StoreCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an aisle and return its id.  Names must be unique.
    pub fn add_aisle(
        &mut self,
        name:     impl Into<String>,
        class:    AisleClass,
        location: Point,
    ) -> CatalogResult<AisleId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(CatalogError::DuplicateAisle(name));
        }
        let id = AisleId::try_from(self.aisles.len()).map_err(|_| CatalogError::TooManyAisles)?;
        self.by_name.insert(name.clone(), id);
        self.aisles.push(Aisle { id, name, class, location });
        Ok(id)
    }

    pub fn build(self) -> StoreCatalog {
        let mut by_class: [Vec<AisleId>; 4] = Default::default();
        for aisle in &self.aisles {
            by_class[aisle.class.index()].push(aisle.id);
        }
        let entries = self
            .aisles
            .iter()
            .map(|a| AisleEntry { point: as_array(a.location), id: a.id })
            .collect();

        StoreCatalog {
            aisles:  self.aisles,
            by_name: self.by_name,
            by_class,
            index:   RTree::bulk_load(entries),
        }
    }
}
