use crate::cache::DistanceCache;
use crate::node::NodeId;
use crate::DistanceFn;
use std::cell::RefCell;
use std::cmp::Ordering;

/// The reference point of a search. Constructed as an explicit two-variant
/// type rather than smuggling a synthetic `-1` id into the node id space —
/// see the Design Notes in SPEC_FULL.md for why.
pub enum Pivot<'a, T> {
    /// The pivot is an already-inserted node — used during construction.
    Node(NodeId),
    /// The pivot is the query item itself — used during `knn`.
    Query(&'a T),
}

/// Produces a total order on ids by distance to a pivot, optionally backed
/// by the construction-time [`DistanceCache`]. `from(id)` is the raw cost;
/// `cmp` layers on an ascending-id tie-break so callers get a deterministic
/// order even when distances collide exactly (required for reproducible
/// builds under a seeded RNG, see Algorithm 4's selection scan).
pub struct TravelingCosts<'a, T, D> {
    items: &'a [T],
    distance_fn: D,
    pivot: Pivot<'a, T>,
    cache: Option<&'a RefCell<DistanceCache>>,
}

impl<'a, T, D: DistanceFn<T>> TravelingCosts<'a, T, D> {
    pub fn for_node(
        items: &'a [T],
        distance_fn: D,
        pivot: NodeId,
        cache: Option<&'a RefCell<DistanceCache>>,
    ) -> Self {
        Self {
            items,
            distance_fn,
            pivot: Pivot::Node(pivot),
            cache,
        }
    }

    pub fn for_query(items: &'a [T], distance_fn: D, query: &'a T) -> Self {
        Self {
            items,
            distance_fn,
            pivot: Pivot::Query(query),
            cache: None,
        }
    }

    /// `d(id, pivot)`, memoized through the construction-time cache when
    /// the pivot is a node. Query-time lookups are never cached: the query
    /// is not a node id and does not belong to the cache's pair space.
    pub fn from(&self, id: NodeId) -> f32 {
        match self.pivot {
            Pivot::Node(pivot) => {
                if pivot == id {
                    return 0.0;
                }
                if let Some(cache) = self.cache {
                    if let Some(hit) = cache.borrow().try_get(pivot, id) {
                        return hit;
                    }
                    let d = self
                        .distance_fn
                        .distance(&self.items[pivot.index()], &self.items[id.index()]);
                    cache.borrow_mut().set(pivot, id, d);
                    d
                } else {
                    self.distance_fn
                        .distance(&self.items[pivot.index()], &self.items[id.index()])
                }
            }
            Pivot::Query(query) => self.distance_fn.distance(query, &self.items[id.index()]),
        }
    }

    /// Distance between two arbitrary ids, independent of the bound pivot.
    /// Used by [`crate::selector`]'s heuristic diversity check, which
    /// compares a candidate against already-selected neighbors rather than
    /// against the pivot.
    pub fn distance_between(&self, a: NodeId, b: NodeId) -> f32 {
        if a == b {
            return 0.0;
        }
        if let Some(cache) = self.cache {
            if let Some(hit) = cache.borrow().try_get(a, b) {
                return hit;
            }
            let d = self
                .distance_fn
                .distance(&self.items[a.index()], &self.items[b.index()]);
            cache.borrow_mut().set(a, b, d);
            d
        } else {
            self.distance_fn
                .distance(&self.items[a.index()], &self.items[b.index()])
        }
    }

    /// Ascending-by-distance order (closer first), ties broken by ascending id.
    pub fn cmp(&self, a: NodeId, b: NodeId) -> Ordering {
        self.from(a)
            .total_cmp(&self.from(b))
            .then_with(|| a.cmp(&b))
    }

    /// The opposite order: farther first, same ascending-id tie-break.
    pub fn reverse(&self) -> ReverseCosts<'_, 'a, T, D> {
        ReverseCosts(self)
    }
}

pub struct ReverseCosts<'b, 'a, T, D>(&'b TravelingCosts<'a, T, D>);

impl<'b, 'a, T, D: DistanceFn<T>> ReverseCosts<'b, 'a, T, D> {
    pub fn from(&self, id: NodeId) -> f32 {
        self.0.from(id)
    }

    pub fn cmp(&self, a: NodeId, b: NodeId) -> Ordering {
        self.0
            .from(a)
            .total_cmp(&self.0.from(b))
            .reverse()
            .then_with(|| a.cmp(&b))
    }
}
