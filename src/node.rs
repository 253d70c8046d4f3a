use smallvec::SmallVec;

/// Inline capacity of a [`NeighborList`] before it spills to the heap.
/// Sized to the common-case `Mmax(0) = 2*M` for the paper's default `M=10`.
const INLINE_NEIGHBORS: usize = 20;

/// Dense insertion-order identifier, stable for the life of the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        NodeId(value as u32)
    }
}

/// A bounded, per-layer neighbor set.
///
/// Order carries no meaning; `Mmax(layer)` is tracked alongside the buffer
/// purely so callers can detect when a prune is due. A single slot of slack
/// beyond `Mmax` is tolerated during insertion (Connect adds the edge first,
/// then prunes if the cap was exceeded) — the container itself never
/// refuses a push.
#[derive(Debug, Clone, Default)]
pub struct NeighborList {
    buf: SmallVec<[NodeId; INLINE_NEIGHBORS]>,
}

impl NeighborList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.buf.iter().any(|&n| n == id)
    }

    /// Adds `id` if not already present. Returns whether it was inserted.
    pub fn push(&mut self, id: NodeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.buf.push(id);
        true
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        if let Some(pos) = self.buf.iter().position(|&n| n == id) {
            self.buf.swap_remove(pos);
            true
        } else {
            false
        }
    }

    /// Replaces the whole set with the result of a (re-)selection.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.buf.clear();
        self.buf.extend(ids);
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.buf.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.buf
    }
}

/// A single graph node: identity plus one bounded neighbor list per layer
/// it participates in (`0..=max_layer`). The item value itself lives once
/// in `GraphCore::items`, not here.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    max_layer: u8,
    connections: Vec<NeighborList>,
}

impl Node {
    pub fn new(id: NodeId, max_layer: u8) -> Self {
        Self {
            id,
            max_layer,
            connections: (0..=max_layer).map(|_| NeighborList::new()).collect(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn max_layer(&self) -> u8 {
        self.max_layer
    }

    pub fn has_layer(&self, layer: u8) -> bool {
        layer <= self.max_layer
    }

    pub fn neighbors(&self, layer: u8) -> &NeighborList {
        &self.connections[layer as usize]
    }

    pub fn neighbors_mut(&mut self, layer: u8) -> &mut NeighborList {
        &mut self.connections[layer as usize]
    }

    pub fn layers(&self) -> impl Iterator<Item = u8> {
        0..=self.max_layer
    }
}
