use crate::cache::DistanceCache;
use crate::node::{Node, NodeId};
use crate::params::Params;
use crate::traveling_cost::TravelingCosts;
use crate::DistanceFn;
use std::cell::RefCell;

/// Owns everything a built (or building) graph needs: the items, the node
/// structure, the distance oracle, parameters, the construction-time
/// distance cache and the current entry point.
///
/// `GraphCore` never holds a reference back to its [`crate::selector::NeighborHeuristic`]
/// or to [`crate::search`] — those are handed a borrow of this struct (or
/// just the parts they need) at each call, avoiding a circular
/// core/selector ownership cycle.
pub struct GraphCore<T, D> {
    items: Vec<T>,
    nodes: Vec<Node>,
    distance_fn: D,
    params: Params,
    cache: Option<RefCell<DistanceCache>>,
    entry_point: Option<NodeId>,
}

impl<T, D: DistanceFn<T>> GraphCore<T, D> {
    pub(crate) fn new(items: Vec<T>, nodes: Vec<Node>, distance_fn: D, params: Params) -> Self {
        let cache = if params.enable_distance_cache_for_construction {
            DistanceCache::new(items.len()).ok().map(RefCell::new)
        } else {
            None
        };
        Self {
            items,
            nodes,
            distance_fn,
            params,
            cache,
            entry_point: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn entry_point(&self) -> Option<NodeId> {
        self.entry_point
    }

    pub(crate) fn set_entry_point(&mut self, id: NodeId) {
        self.entry_point = Some(id);
    }

    /// Appends a freshly constructed node. Callers must push nodes in id
    /// order (`node.id().index() == self.nodes.len()`): the graph is built
    /// incrementally, one insertion at a time, same as the paper's INSERT.
    pub(crate) fn push_node(&mut self, node: Node) {
        debug_assert_eq!(node.id().index(), self.nodes.len());
        self.nodes.push(node);
    }

    /// Drops the construction-time distance cache. Called once `build`
    /// finishes: query pivots are never node ids, so the cache has no
    /// further use and its memory can be reclaimed.
    pub(crate) fn drop_construction_cache(&mut self) {
        self.cache = None;
    }

    pub fn costs_for_node(&self, pivot: NodeId) -> TravelingCosts<'_, T, D> {
        TravelingCosts::for_node(&self.items, self.distance_fn, pivot, self.cache.as_ref())
    }

    pub fn costs_for_query<'a>(&'a self, query: &'a T) -> TravelingCosts<'a, T, D> {
        TravelingCosts::for_query(&self.items, self.distance_fn, query)
    }

    pub fn distance_fn(&self) -> D {
        self.distance_fn
    }
}
