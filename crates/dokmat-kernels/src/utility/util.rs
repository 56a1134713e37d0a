//! Tuning constants and parallel fan-out helpers shared by the kernels
//
// Inputs at or below the small limits run sequentially to avoid rayon overhead.
// Larger inputs fan out over rayon's global pool; size it with `init_parallel`
// or RAYON_NUM_THREADS.

use dokmat_core::Result;
use rayon::prelude::*;

/// Chunk size for per-thread accumulators
pub const STRIPE: usize = 8192;
/// Threshold for switching between sequential and parallel paths (dimension)
pub const SMALL_DIM_LIMIT: usize = 2048;
/// Threshold for switching between sequential and parallel paths (nnz)
pub const SMALL_NNZ_LIMIT: usize = 32 * 1024;

/// Configures rayon's global pool. `None` keeps rayon's own detection, which
/// honours `RAYON_NUM_THREADS`. Returns `false` if the pool was already built.
pub fn init_parallel(num_threads: Option<usize>) -> bool {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = num_threads {
        builder = builder.num_threads(n);
    }
    builder.build_global().is_ok()
}

#[inline]
#[must_use]
pub fn current_threads() -> usize {
    rayon::current_num_threads().max(1)
}

/// Runs `f` over every item, in parallel above [`SMALL_NNZ_LIMIT`]. Stops at
/// the first error; all writes of a successful call are visible on return.
pub fn try_fan_out<I, F>(items: Vec<I>, f: F) -> Result<()>
where
    I: Send,
    F: Fn(I) -> Result<()> + Sync + Send,
{
    if items.len() <= SMALL_NNZ_LIMIT {
        items.into_iter().try_for_each(f)
    } else {
        items.into_par_iter().try_for_each(f)
    }
}

/// Sorts by key, in parallel above [`SMALL_NNZ_LIMIT`].
pub fn sort_by_key<I, K, F>(items: &mut [I], f: F)
where
    I: Send,
    K: Ord,
    F: Fn(&I) -> K + Sync,
{
    if items.len() <= SMALL_NNZ_LIMIT {
        items.sort_unstable_by_key(f);
    } else {
        items.par_sort_unstable_by_key(f);
    }
}

/// Stable sort by comparator, in parallel above [`SMALL_NNZ_LIMIT`].
pub fn sort_by<I, F>(items: &mut [I], f: F)
where
    I: Send,
    F: Fn(&I, &I) -> std::cmp::Ordering + Sync,
{
    if items.len() <= SMALL_NNZ_LIMIT {
        items.sort_by(f);
    } else {
        items.par_sort_by(f);
    }
}
