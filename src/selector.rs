use crate::graph::GraphCore;
use crate::heap::BinaryHeap;
use crate::node::NodeId;
use crate::params::NeighborHeuristic;
use crate::traveling_cost::TravelingCosts;
use crate::DistanceFn;
use ahash::AHashSet;

impl NeighborHeuristic {
    /// Picks `target` ids out of `candidates`, ordered by `costs`.
    ///
    /// `layer` is only consulted by `SelectHeuristic`'s `expand_best_selection`
    /// step, which walks each candidate's own layer-`layer` neighbor list to
    /// widen the pool before pruning. `target` is the desired result size —
    /// callers pass `params.m` when selecting connections for a freshly
    /// inserted node and `params.m_max(layer)` when re-pruning an
    /// over-capacity neighbor list, so the two magnitudes can differ even at
    /// the same layer (layer 0's Mmax is `2*M`, never `M`).
    pub fn select<T, D: DistanceFn<T>>(
        &self,
        core: &GraphCore<T, D>,
        candidates: &[NodeId],
        costs: &TravelingCosts<'_, T, D>,
        layer: u8,
        target: usize,
    ) -> Vec<NodeId> {
        match self {
            NeighborHeuristic::SelectSimple => select_simple(candidates, costs, target),
            NeighborHeuristic::SelectHeuristic => select_heuristic(core, candidates, costs, layer, target),
        }
    }
}

/// Algorithm 3. Keeps only the `target` closest-to-pivot candidates, via a
/// bounded max-heap (farthest at the root) so the whole candidate set never
/// needs a full sort.
fn select_simple<T, D: DistanceFn<T>>(
    candidates: &[NodeId],
    costs: &TravelingCosts<'_, T, D>,
    target: usize,
) -> Vec<NodeId> {
    let mut heap = BinaryHeap::with_capacity(target + 1, |a: NodeId, b: NodeId| costs.reverse().cmp(a, b));
    for &id in candidates {
        heap.push(id);
        if heap.len() > target {
            heap.pop();
        }
    }
    let mut result = heap.as_unordered_slice().to_vec();
    result.sort_by(|&a, &b| costs.cmp(a, b));
    result
}

/// Algorithm 4. Scans candidates closest-to-pivot first, keeping a
/// candidate only if it is closer to the pivot than to every neighbor
/// already selected — this is what spreads edges across directions instead
/// of clustering them all on one side of the pivot.
///
/// When `expand_best_selection` is set, each candidate's own neighbors at
/// `layer` are folded into the pool first, on the premise that a neighbor of
/// a near candidate may itself be a good, as-yet-unseen candidate.
///
/// When `keep_pruned_connections` is set, candidates rejected by the
/// diversity check are kept on the side and used to top the result back up
/// to `target` if the diversity pass alone falls short.
fn select_heuristic<T, D: DistanceFn<T>>(
    core: &GraphCore<T, D>,
    candidates: &[NodeId],
    costs: &TravelingCosts<'_, T, D>,
    layer: u8,
    target: usize,
) -> Vec<NodeId> {
    let params = core.params();
    let mut pool: Vec<NodeId> = candidates.to_vec();

    if params.expand_best_selection {
        let mut seen: AHashSet<NodeId> = pool.iter().copied().collect();
        let mut extra = Vec::new();
        for &id in candidates {
            for neighbor in core.node(id).neighbors(layer).iter() {
                if seen.insert(neighbor) {
                    extra.push(neighbor);
                }
            }
        }
        pool.extend(extra);
    }

    pool.sort_by(|&a, &b| costs.cmp(a, b));

    let mut selected: Vec<NodeId> = Vec::with_capacity(target);
    let mut discarded: Vec<NodeId> = Vec::new();

    for candidate in pool {
        if selected.len() >= target {
            break;
        }
        let closer_to_pivot_than_to_any_selected = selected
            .iter()
            .all(|&s| costs.from(candidate) < costs.distance_between(candidate, s));
        if closer_to_pivot_than_to_any_selected {
            selected.push(candidate);
        } else {
            discarded.push(candidate);
        }
    }

    if params.keep_pruned_connections && selected.len() < target {
        for candidate in discarded {
            if selected.len() >= target {
                break;
            }
            selected.push(candidate);
        }
    }

    selected
}
