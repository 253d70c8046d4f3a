use crate::graph::GraphCore;
use crate::heap::BinaryHeap;
use crate::node::NodeId;
use crate::traveling_cost::TravelingCosts;
use crate::DistanceFn;
use ahash::AHashSet;

/// Algorithm 2 (SEARCH-LAYER). Greedily expands from `entry_points` at
/// `layer`, keeping the `ef` best candidates found so far, until no
/// unvisited neighbor of the current candidate frontier can improve on the
/// worst kept result.
///
/// Returns up to `ef` ids, unordered (callers needing an order should sort
/// against the same `costs`).
pub fn search_layer<T, D: DistanceFn<T>>(
    core: &GraphCore<T, D>,
    costs: &TravelingCosts<'_, T, D>,
    entry_points: &[NodeId],
    ef: usize,
    layer: u8,
) -> Vec<NodeId> {
    let mut visited: AHashSet<NodeId> = entry_points.iter().copied().collect();

    // candidates: closest-first, the working frontier still to expand.
    let mut candidates = BinaryHeap::new(|a: NodeId, b: NodeId| costs.cmp(a, b));
    // found: farthest-first, so the root is the worst of the kept results
    // and is the one evicted when a closer candidate is found.
    let mut found = BinaryHeap::new(|a: NodeId, b: NodeId| costs.reverse().cmp(a, b));

    for &ep in entry_points {
        candidates.push(ep);
        found.push(ep);
    }

    while !candidates.is_empty() {
        let nearest = candidates.pop().expect("non-empty");
        let worst_found = found.peek();
        if let Some(worst) = worst_found {
            if found.len() >= ef && costs.from(nearest) > costs.from(worst) {
                break;
            }
        }

        if !core.node(nearest).has_layer(layer) {
            continue;
        }

        for neighbor in core.node(nearest).neighbors(layer).iter() {
            if !visited.insert(neighbor) {
                continue;
            }
            let worst_found = found.peek();
            let should_consider = match worst_found {
                Some(worst) => found.len() < ef || costs.from(neighbor) < costs.from(worst),
                None => true,
            };
            if should_consider {
                candidates.push(neighbor);
                found.push(neighbor);
                if found.len() > ef {
                    found.pop();
                }
            }
        }
    }

    found.as_unordered_slice().to_vec()
}
