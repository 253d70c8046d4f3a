use crate::error::Error;
use crate::graph::GraphCore;
use crate::node::{Node, NodeId};
use crate::params::Params;
use crate::search::search_layer;
use crate::DistanceFn;
use rand::Rng;
use tracing::{debug, info, instrument};

/// Algorithm 1 (INSERT), run once per item in `items`' order.
///
/// Construction is single-threaded and not resumable: a build either
/// completes or returns an error, there is no partially-built index to
/// recover. This mirrors the paper, which treats insertion order as part of
/// the index's identity (the level-assignment RNG is consumed in order).
#[instrument(skip(items, rng, distance_fn), fields(n = items.len(), m = params.m, ef_construction = params.ef_construction))]
pub fn build<T, D: DistanceFn<T>>(
    items: Vec<T>,
    rng: &mut impl Rng,
    params: Params,
    distance_fn: D,
) -> Result<GraphCore<T, D>, Error> {
    params.validate(None)?;

    let n = items.len();
    let mut core = GraphCore::new(items, Vec::with_capacity(n), distance_fn, params);

    for i in 0..n {
        insert(&mut core, rng, NodeId(i as u32));
    }

    core.drop_construction_cache();
    match core.entry_point() {
        Some(entry) => info!(
            entry_point = ?entry,
            top_layer = core.node(entry).max_layer(),
            "build complete"
        ),
        None => info!("build complete (empty index)"),
    }
    Ok(core)
}

fn sample_level(rng: &mut impl Rng, level_lambda: f64) -> u8 {
    let u = 1.0 - rng.gen::<f64>(); // rand's gen() is [0,1); map to (0,1] so ln is finite
    let level = (-u.ln() * level_lambda).floor();
    level.clamp(0.0, u8::MAX as f64) as u8
}

#[instrument(skip(core, rng))]
fn insert<T, D: DistanceFn<T>>(core: &mut GraphCore<T, D>, rng: &mut impl Rng, id: NodeId) {
    let level = sample_level(rng, core.params().level_lambda);
    debug!(?id, level, "assigned level");

    let Some(entry) = core.entry_point() else {
        core.push_node(Node::new(id, level));
        core.set_entry_point(id);
        return;
    };

    let entry_max_layer = core.node(entry).max_layer();
    let mut ep = entry;

    // descend greedily (ef=1) from the top layer down to one above the new
    // node's own top layer, narrowing to a single good entry point per layer.
    for layer in (level + 1..=entry_max_layer).rev() {
        let costs = core.costs_for_node(id);
        let found = search_layer(core, &costs, &[ep], 1, layer);
        if let Some(&closest) = found.iter().min_by(|&&a, &&b| costs.cmp(a, b)) {
            ep = closest;
        }
    }

    core.push_node(Node::new(id, level));

    let top_shared_layer = level.min(entry_max_layer);

    for layer in (0..=top_shared_layer).rev() {
        let costs = core.costs_for_node(id);
        let ef = core.params().ef_construction;
        let candidates = search_layer(core, &costs, &[ep], ef, layer);

        let target = core.params().m;
        let neighbors = core
            .params()
            .neighbor_heuristic
            .select(core, &candidates, &costs, layer, target);

        for &neighbor in &neighbors {
            core.node_mut(id).neighbors_mut(layer).push(neighbor);
            core.node_mut(neighbor).neighbors_mut(layer).push(id);
        }

        let m_max = core.params().m_max(layer);
        for &neighbor in &neighbors {
            prune_if_over_capacity(core, neighbor, layer, m_max);
        }

        // if any newly connected neighbor is strictly closer to the inserted
        // node than the current entry point, it becomes the seed for the
        // next, lower layer's search.
        for &neighbor in &neighbors {
            if costs.from(neighbor) < costs.from(ep) {
                ep = neighbor;
            }
        }
    }

    if level > entry_max_layer {
        core.set_entry_point(id);
    }
}

fn prune_if_over_capacity<T, D: DistanceFn<T>>(core: &mut GraphCore<T, D>, node: NodeId, layer: u8, m_max: usize) {
    if core.node(node).neighbors(layer).len() <= m_max {
        return;
    }
    let costs = core.costs_for_node(node);
    let current: Vec<NodeId> = core.node(node).neighbors(layer).iter().collect();
    let selected = core
        .params()
        .neighbor_heuristic
        .select(core, &current, &costs, layer, m_max);
    core.node_mut(node).neighbors_mut(layer).replace(selected);
}
