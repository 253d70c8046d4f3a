use crate::error::Error;
use crate::graph::GraphCore;
use crate::node::{Node, NodeId};
use crate::params::Params;
use crate::DistanceFn;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// On-disk node record: its original id (stable across insertion order,
/// since `items` are not persisted) and its per-layer adjacency, indexed by
/// layer.
#[derive(Serialize, Deserialize)]
struct WireNode {
    id: u32,
    max_layer: u8,
    layers: Vec<Vec<u32>>,
}

#[derive(Serialize, Deserialize)]
struct WireGraph {
    item_count: usize,
    entry_point: Option<u32>,
    nodes: Vec<WireNode>,
}

/// Visits every node reachable from the entry point, across all of its
/// layers, breadth-first. Any node left unvisited afterwards (there
/// shouldn't be one, per the connectivity invariant) is appended in id
/// order so serialization never silently drops a node.
fn bfs_order<T, D: DistanceFn<T>>(core: &GraphCore<T, D>) -> Vec<NodeId> {
    let mut visited = vec![false; core.len()];
    let mut order = Vec::with_capacity(core.len());
    let mut queue = VecDeque::new();

    if let Some(entry) = core.entry_point() {
        visited[entry.index()] = true;
        queue.push_back(entry);
    }

    while let Some(id) = queue.pop_front() {
        order.push(id);
        for layer in core.node(id).layers() {
            for neighbor in core.node(id).neighbors(layer).iter() {
                if !visited[neighbor.index()] {
                    visited[neighbor.index()] = true;
                    queue.push_back(neighbor);
                }
            }
        }
    }

    for i in 0..core.len() {
        if !visited[i] {
            order.push(NodeId(i as u32));
        }
    }

    order
}

pub fn serialize<T, D: DistanceFn<T>>(core: &GraphCore<T, D>) -> Result<Vec<u8>, Error> {
    let nodes = bfs_order(core)
        .into_iter()
        .map(|id| {
            let node = core.node(id);
            let layers = node
                .layers()
                .map(|layer| node.neighbors(layer).iter().map(|n| n.0).collect())
                .collect();
            WireNode {
                id: id.0,
                max_layer: node.max_layer(),
                layers,
            }
        })
        .collect();

    let wire = WireGraph {
        item_count: core.len(),
        entry_point: core.entry_point().map(|e| e.0),
        nodes,
    };

    bincode::serialize(&wire).map_err(Error::Serialization)
}

pub fn deserialize<T, D: DistanceFn<T>>(
    items: Vec<T>,
    bytes: &[u8],
    distance_fn: D,
    params: Params,
) -> Result<GraphCore<T, D>, Error> {
    let wire: WireGraph = bincode::deserialize(bytes).map_err(Error::Serialization)?;

    if wire.item_count != items.len() {
        return Err(Error::Deserialization {
            reason: format!(
                "serialized graph has {} items, but {} were supplied",
                wire.item_count,
                items.len()
            ),
        });
    }

    let n = items.len();
    let mut slots: Vec<Option<Node>> = (0..n).map(|_| None).collect();
    for wire_node in wire.nodes {
        let id = NodeId(wire_node.id);
        if id.index() >= n {
            return Err(Error::Deserialization {
                reason: format!("node id {} out of range for {} items", wire_node.id, n),
            });
        }
        let mut node = Node::new(id, wire_node.max_layer);
        for (layer, neighbors) in wire_node.layers.into_iter().enumerate() {
            for neighbor in neighbors {
                node.neighbors_mut(layer as u8).push(NodeId(neighbor));
            }
        }
        slots[id.index()] = Some(node);
    }

    let mut nodes = Vec::with_capacity(n);
    for (i, slot) in slots.into_iter().enumerate() {
        nodes.push(slot.ok_or_else(|| Error::Deserialization {
            reason: format!("node {i} missing from serialized graph"),
        })?);
    }

    let mut core = GraphCore::new(items, nodes, distance_fn, params);
    if let Some(entry) = wire.entry_point {
        core.set_entry_point(NodeId(entry));
    }
    core.drop_construction_cache();

    Ok(core)
}
