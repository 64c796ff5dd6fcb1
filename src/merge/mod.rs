/// Stable merge engine: the combining phase of merge sort.
///
/// Three layers share one stability rule (ties resolved by earliest source
/// argument): direct 2/3/4-way merges with fixed pairwise decision trees
/// (`core`), a divide-and-conquer merge whose halves may run concurrently
/// (`dac`), and a span-cascade driver that collapses a list of sorted runs
/// pairwise until one remains (`cascade`).
use thiserror::Error;

mod cascade;
mod core;
mod dac;


pub use self::cascade::*;
pub use self::core::*;
pub use self::dac::*;

/// Merge failures. All are raised before any element moves; a failure in a
/// concurrent branch aborts the whole merge at the join point.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("destination length {actual} does not match required length {required}")]
    SizeMismatch { required: usize, actual: usize },

    #[error("failed to build merge thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub(crate) fn check_dst_len(required: usize, actual: usize) -> Result<(), MergeError> {
    if required != actual {
        return Err(MergeError::SizeMismatch { required, actual });
    }
    Ok(())
}
