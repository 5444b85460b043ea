//! Spatial indices over element rectangles.
//!
//! Areas talk to their indices only through [`SpatialIndex`]; the concrete
//! structure is chosen with [`IndexKind`].

use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

use crate::model::Rect;

/// Spatial relation between an element and a query rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialPredicate {
    /// The element rectangle lies inside the query rectangle
    ContainedBy,
    /// The element rectangle and the query rectangle intersect
    OverlappedBy,
    /// The query rectangle lies inside the element rectangle
    Contains,
}

impl SpatialPredicate {
    /// Evaluate the predicate for an element rectangle.
    pub fn matches(self, element: &Rect, query: &Rect) -> bool {
        match self {
            SpatialPredicate::ContainedBy => query.contains(element),
            SpatialPredicate::OverlappedBy => element.overlaps(query),
            SpatialPredicate::Contains => element.contains(query),
        }
    }
}

/// A narrow spatial index: ids with rectangles, three predicates.
pub trait SpatialIndex {
    /// Register `id` with its rectangle.
    fn insert(&mut self, id: usize, rect: Rect);

    /// Ids matching `predicate` against `query`, in ascending id order.
    fn query(&self, predicate: SpatialPredicate, query: &Rect) -> Vec<usize>;

    /// Number of registered ids.
    fn len(&self) -> usize;

    /// Whether the index is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which index implementation an area uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// R-tree backed index
    #[default]
    RTree,
    /// Linear scan over a list (small pages, tests)
    Scan,
}

impl IndexKind {
    /// Create an empty index of this kind.
    pub fn create(self) -> AnyIndex {
        match self {
            IndexKind::RTree => AnyIndex::RTree(RTreeIndex::default()),
            IndexKind::Scan => AnyIndex::Scan(ScanIndex::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct IndexedRect {
    id: usize,
    rect: Rect,
}

impl RTreeObject for IndexedRect {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.min_x, self.rect.min_y],
            [self.rect.max_x, self.rect.max_y],
        )
    }
}

/// R-tree index (rstar) with incremental inserts.
#[derive(Debug, Clone, Default)]
pub struct RTreeIndex {
    tree: RTree<IndexedRect>,
}

impl SpatialIndex for RTreeIndex {
    fn insert(&mut self, id: usize, rect: Rect) {
        self.tree.insert(IndexedRect { id, rect });
    }

    fn query(&self, predicate: SpatialPredicate, query: &Rect) -> Vec<usize> {
        let env = AABB::from_corners([query.min_x, query.min_y], [query.max_x, query.max_y]);
        let candidates: Box<dyn Iterator<Item = &IndexedRect>> = match predicate {
            SpatialPredicate::ContainedBy => Box::new(self.tree.locate_in_envelope(&env)),
            _ => Box::new(self.tree.locate_in_envelope_intersecting(&env)),
        };
        // The envelope tests include touching edges; refine with the exact predicate.
        let mut ids: Vec<usize> = candidates
            .filter(|node| predicate.matches(&node.rect, query))
            .map(|node| node.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

/// List-scan index.
#[derive(Debug, Clone, Default)]
pub struct ScanIndex {
    entries: Vec<(usize, Rect)>,
}

impl SpatialIndex for ScanIndex {
    fn insert(&mut self, id: usize, rect: Rect) {
        self.entries.push((id, rect));
    }

    fn query(&self, predicate: SpatialPredicate, query: &Rect) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .entries
            .iter()
            .filter(|(_, rect)| predicate.matches(rect, query))
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Enum dispatch over the available index implementations.
#[derive(Debug, Clone)]
pub enum AnyIndex {
    /// R-tree backed
    RTree(RTreeIndex),
    /// Linear scan
    Scan(ScanIndex),
}

impl Default for AnyIndex {
    fn default() -> Self {
        IndexKind::default().create()
    }
}

impl SpatialIndex for AnyIndex {
    fn insert(&mut self, id: usize, rect: Rect) {
        match self {
            AnyIndex::RTree(index) => index.insert(id, rect),
            AnyIndex::Scan(index) => index.insert(id, rect),
        }
    }

    fn query(&self, predicate: SpatialPredicate, query: &Rect) -> Vec<usize> {
        match self {
            AnyIndex::RTree(index) => index.query(predicate, query),
            AnyIndex::Scan(index) => index.query(predicate, query),
        }
    }

    fn len(&self) -> usize {
        match self {
            AnyIndex::RTree(index) => index.len(),
            AnyIndex::Scan(index) => index.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(kind: IndexKind) -> AnyIndex {
        let mut index = kind.create();
        index.insert(0, Rect::new(0.0, 0.0, 10.0, 10.0));
        index.insert(1, Rect::new(20.0, 0.0, 30.0, 10.0));
        index.insert(2, Rect::new(5.0, 5.0, 25.0, 8.0));
        index.insert(3, Rect::new(-100.0, -100.0, 100.0, 100.0));
        index
    }

    #[test]
    fn test_predicates_agree_across_implementations() {
        let queries = [
            Rect::new(0.0, 0.0, 30.0, 10.0),
            Rect::new(9.0, 1.0, 21.0, 2.0),
            Rect::new(6.0, 6.0, 7.0, 7.0),
            Rect::new(10.0, 0.0, 20.0, 4.0),
        ];
        let rtree = populate(IndexKind::RTree);
        let scan = populate(IndexKind::Scan);
        for query in &queries {
            for predicate in [
                SpatialPredicate::ContainedBy,
                SpatialPredicate::OverlappedBy,
                SpatialPredicate::Contains,
            ] {
                assert_eq!(
                    rtree.query(predicate, query),
                    scan.query(predicate, query),
                    "{:?} {:?}",
                    predicate,
                    query
                );
            }
        }
    }

    #[test]
    fn test_contained_by() {
        let index = populate(IndexKind::RTree);
        let ids = index.query(SpatialPredicate::ContainedBy, &Rect::new(0.0, 0.0, 30.0, 10.0));
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_overlapped_by_excludes_touching() {
        let index = populate(IndexKind::RTree);
        // Touches element 0 at x=10 and element 1 at x=20, crosses 2 and 3.
        let ids = index.query(SpatialPredicate::OverlappedBy, &Rect::new(10.0, 0.0, 20.0, 4.0));
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_contains() {
        let index = populate(IndexKind::Scan);
        let ids = index.query(SpatialPredicate::Contains, &Rect::new(6.0, 6.0, 7.0, 7.0));
        assert_eq!(ids, vec![0, 2, 3]);
        assert_eq!(index.len(), 4);
    }
}
