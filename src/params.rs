use crate::error::Error;

/// The two interchangeable neighbor-selection strategies (Algorithms 3 and 4
/// of Malkov & Yashunin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborHeuristic {
    /// Algorithm 3: keep the `M` closest candidates to the pivot.
    SelectSimple,
    /// Algorithm 4: diversity-aware selection, preferring candidates that
    /// are closer to the pivot than to any already-selected neighbor.
    #[default]
    SelectHeuristic,
}

/// Construction and search parameters. Mirrors the paper's knobs directly;
/// defaults match the paper's recommendations.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    /// Target degree on layers above 0. `Mmax0 = 2*m` is used at layer 0.
    pub m: usize,
    /// Scale of the exponential layer distribution. Defaults to `1/ln(m)`.
    pub level_lambda: f64,
    /// Candidate-list width during construction.
    pub ef_construction: usize,
    /// Which neighbor-selection strategy to use during construction.
    pub neighbor_heuristic: NeighborHeuristic,
    /// When the heuristic under-fills `R`, top it back up to `M` from the
    /// discarded candidates rather than leaving the node under-connected.
    pub keep_pruned_connections: bool,
    /// Pre-expand the candidate pool with each candidate's own neighborhood
    /// before running the heuristic scan.
    pub expand_best_selection: bool,
    /// Maintain the symmetric pairwise distance cache during construction.
    pub enable_distance_cache_for_construction: bool,
}

impl Default for Params {
    fn default() -> Self {
        let m = 10;
        Self {
            m,
            level_lambda: 1.0 / (m as f64).ln(),
            ef_construction: 200,
            neighbor_heuristic: NeighborHeuristic::SelectHeuristic,
            keep_pruned_connections: true,
            expand_best_selection: false,
            enable_distance_cache_for_construction: true,
        }
    }
}

impl Params {
    /// Mmax at layer 0.
    pub fn m_max_zero(&self) -> usize {
        self.m * 2
    }

    /// Mmax at the given layer (0 is the dense bottom layer).
    pub fn m_max(&self, layer: u8) -> usize {
        if layer == 0 {
            self.m_max_zero()
        } else {
            self.m
        }
    }

    pub(crate) fn validate(&self, k: Option<usize>) -> Result<(), Error> {
        if self.m == 0 {
            return Err(Error::InvalidParameters {
                reason: "M must be > 0".to_string(),
            });
        }
        if self.ef_construction == 0 {
            return Err(Error::InvalidParameters {
                reason: "efConstruction must be > 0".to_string(),
            });
        }
        if !(self.level_lambda > 0.0) {
            return Err(Error::InvalidParameters {
                reason: "levelLambda must be > 0".to_string(),
            });
        }
        if let Some(k) = k {
            if k == 0 {
                return Err(Error::InvalidParameters {
                    reason: "k must be > 0".to_string(),
                });
            }
        }
        Ok(())
    }
}
