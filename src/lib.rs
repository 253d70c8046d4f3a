//! Hierarchical Navigable Small World approximate nearest-neighbor index.
//!
//! The core (`GraphCore`, `builder`, `search`, `selector`) is generic over
//! any item type `T` and a user-supplied distance oracle `D`; it never
//! hardcodes a metric or a vector representation. [`HnswIndex`] is the thin
//! facade most callers want: build an index once, then query it with `knn`.

pub mod builder;
pub mod cache;
pub mod error;
pub mod graph;
pub mod heap;
pub mod node;
pub mod params;
pub mod query;
pub mod search;
pub mod selector;
pub mod serialize;
pub mod traveling_cost;

pub use error::Error;
pub use graph::GraphCore;
pub use node::NodeId;
pub use params::{NeighborHeuristic, Params};
pub use query::Neighbor;

use rand::Rng;

/// A symmetric (or not — nothing here requires it) distance between two
/// items. Implemented for any `Copy` closure `Fn(&T, &T) -> f32`, so the
/// common case needs no explicit impl:
///
/// ```ignore
/// let index = HnswIndex::build(items, &mut rng, params, |a: &[f32], b: &[f32]| {
///     a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f32>().sqrt()
/// });
/// ```
pub trait DistanceFn<T>: Copy {
    fn distance(&self, a: &T, b: &T) -> f32;
}

impl<T, F> DistanceFn<T> for F
where
    F: Fn(&T, &T) -> f32 + Copy,
{
    fn distance(&self, a: &T, b: &T) -> f32 {
        (self)(a, b)
    }
}

/// Owns a built graph plus the pieces needed to query and persist it: the
/// items themselves (by value) and the distance oracle.
///
/// `T` and `D` are bounded `Send + Sync` here, not on the core types below,
/// because this is the type applications actually share across threads —
/// wrap it in an `Arc` and hand out read-only queries from as many worker
/// threads as you like. There is no interior mutability after `build`
/// returns; nothing about querying mutates the graph.
pub struct HnswIndex<T, D> {
    core: GraphCore<T, D>,
}

impl<T, D> HnswIndex<T, D>
where
    D: DistanceFn<T> + Send + Sync,
    T: Send + Sync,
{
    /// Builds a new index over `items`, in order, under a caller-supplied
    /// RNG (so builds are reproducible under a fixed seed).
    pub fn build(items: Vec<T>, rng: &mut impl Rng, params: Params, distance_fn: D) -> Result<Self, Error> {
        let core = builder::build(items, rng, params, distance_fn)?;
        Ok(Self { core })
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Reconstructs an index from a byte buffer produced by [`Self::serialize`].
    /// `items` must be supplied in the exact order used to build the
    /// original index — they are not part of the serialized payload.
    pub fn deserialize(items: Vec<T>, bytes: &[u8], distance_fn: D, params: Params) -> Result<Self, Error> {
        let core = serialize::deserialize(items, bytes, distance_fn, params)?;
        Ok(Self { core })
    }

    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        serialize::serialize(&self.core)
    }
}

impl<T, D> HnswIndex<T, D>
where
    D: DistanceFn<T> + Send + Sync,
    T: Clone + Send + Sync,
{
    /// Algorithm 5: returns the `k` nearest items to `query`, ascending by
    /// distance.
    pub fn knn(&self, query: &T, k: usize) -> Result<Vec<Neighbor<T>>, Error> {
        query::knn(&self.core, query, k)
    }
}
