use thiserror::Error;

/// Errors surfaced at the crate's public API boundary.
///
/// The core never retries and never swallows a failure: every fallible
/// operation returns one of these variants. Internal invariant breaches
/// (heap ordering, neighbor-list capacity) are programming errors and
/// panic via `debug_assert!`/`unreachable!` rather than being represented
/// here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("distance cache would need {n}*({n}+1)/2 entries, which overflows usize addressing")]
    CapacityExceeded { n: usize },

    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("knn called before build")]
    NotBuilt,

    /// Reserved for API symmetry with `NotBuilt`; never constructed. A
    /// zero-item build is not an error — `knn` on it returns `Ok(vec![])`.
    #[error("index has no items")]
    EmptyIndex,

    #[error("failed to serialize graph: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("failed to deserialize graph: {reason}")]
    Deserialization { reason: String },
}
