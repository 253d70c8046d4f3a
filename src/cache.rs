use crate::error::Error;
use crate::node::NodeId;
use ahash::AHashMap;
use bitvec::vec::BitVec;

/// Symmetric pairwise distance cache keyed by the unordered pair `{i, j}`.
///
/// Two strategies are exposed behind one enum so call sites never need to
/// match on which one is active — `new` picks the triangular array whenever
/// it addresses cleanly, falling back to the hash-map form otherwise.
pub enum DistanceCache {
    Triangular {
        present: BitVec,
        values: Vec<f32>,
    },
    Map(AHashMap<(u32, u32), f32>),
}

fn triangular_key(i: u32, j: u32) -> usize {
    let (hi, lo) = if i >= j { (i, j) } else { (j, i) };
    let hi = hi as usize;
    (hi * (hi + 1)) / 2 + lo as usize
}

fn canonical_pair(i: u32, j: u32) -> (u32, u32) {
    if i <= j {
        (i, j)
    } else {
        (j, i)
    }
}

impl DistanceCache {
    /// Builds a cache sized for `n` items. Uses the triangular array form
    /// when `n*(n+1)/2` addresses cleanly in a `usize`, otherwise the map
    /// form. `CapacityExceeded` is reported eagerly, at construction, never
    /// lazily on first access.
    pub fn new(n: usize) -> Result<Self, Error> {
        match n.checked_mul(n + 1).and_then(|x| x.checked_div(2)) {
            Some(capacity) if n <= 65_535 => Ok(DistanceCache::Triangular {
                present: BitVec::repeat(false, capacity),
                values: vec![0.0; capacity],
            }),
            Some(_) => Ok(DistanceCache::Map(AHashMap::new())),
            None => Err(Error::CapacityExceeded { n }),
        }
    }

    pub fn try_get(&self, i: NodeId, j: NodeId) -> Option<f32> {
        match self {
            DistanceCache::Triangular { present, values } => {
                let key = triangular_key(i.0, j.0);
                present.get(key).filter(|bit| **bit).map(|_| values[key])
            }
            DistanceCache::Map(map) => map.get(&canonical_pair(i.0, j.0)).copied(),
        }
    }

    pub fn set(&mut self, i: NodeId, j: NodeId, value: f32) {
        match self {
            DistanceCache::Triangular { present, values } => {
                let key = triangular_key(i.0, j.0);
                present.set(key, true);
                values[key] = value;
            }
            DistanceCache::Map(map) => {
                map.insert(canonical_pair(i.0, j.0), value);
            }
        }
    }
}
