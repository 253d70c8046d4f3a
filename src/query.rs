use crate::error::Error;
use crate::graph::GraphCore;
use crate::search::search_layer;
use crate::DistanceFn;
use itertools::Itertools;

/// One search result: the original item (cloned out of the index) paired
/// with its distance to the query and its stable node id.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor<T> {
    pub id: usize,
    pub item: T,
    pub distance: f32,
}

/// Algorithm 5 (K-NN-SEARCH). Descends greedily from the entry point down
/// to layer 1 as in construction, then runs `search_layer` at layer 0 with
/// `ef` fixed to `k`, and returns the `k` closest results in ascending
/// distance order.
pub fn knn<T: Clone, D: DistanceFn<T>>(
    core: &GraphCore<T, D>,
    query: &T,
    k: usize,
) -> Result<Vec<Neighbor<T>>, Error> {
    core.params().validate(Some(k))?;

    // a zero-item build has no entry point; that's not an error condition,
    // there are simply no neighbors to return.
    let Some(entry) = core.entry_point() else {
        return Ok(Vec::new());
    };

    let costs = core.costs_for_query(query);
    let mut nearest = entry;
    let top_layer = core.node(entry).max_layer();

    for layer in (1..=top_layer).rev() {
        let found = search_layer(core, &costs, &[nearest], 1, layer);
        if let Some(&closest) = found.iter().min_by(|&&a, &&b| costs.cmp(a, b)) {
            nearest = closest;
        }
    }

    let candidates = search_layer(core, &costs, &[nearest], k, 0);

    Ok(candidates
        .into_iter()
        .sorted_by(|&a, &b| costs.cmp(a, b))
        .take(k)
        .map(|id| Neighbor {
            id: id.index(),
            item: core.items()[id.index()].clone(),
            distance: costs.from(id),
        })
        .collect())
}
