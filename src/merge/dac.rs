/// Divide-and-conquer merge of two sorted slices.
///
/// Below the threshold the slices are merged directly. Above it, the
/// larger slice is split at its midpoint; a binary search locates the
/// matching split point in the smaller slice, the pivot is written to its
/// final destination, and the two disjoint sub-problems recurse — on one
/// thread, or as a rayon fork-join pair in the parallel variant. The
/// destination is split into non-overlapping sub-slices before the
/// branches run, so siblings share no mutable state.
///
/// Stability: when the pivot comes from `a`, the split point in `b` is the
/// first element not less than the pivot, so `b`'s equal elements land
/// after it; when the pivot comes from `b`, the split point in `a` is the
/// first element strictly greater, so `a`'s equal elements stay before it.
/// Either way ties resolve toward `a`, and the output is identical to the
/// direct 2-way merge at any threshold.
use std::cmp::Ordering;

use super::core::merge_runs;
use super::{MergeError, check_dst_len};

/// Merges at or below this combined length use the direct 2-way path.
pub const MERGE_DAC_THRESHOLD: usize = 8192;

fn dac_recurse<T, F>(a: &[T], b: &[T], dst: &mut [T], threshold: usize, cmp: &F)
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    if a.len() + b.len() <= threshold {
        merge_runs(a, b, dst, &mut |x: &T, y: &T| cmp(x, y));
        return;
    }
    if a.len() >= b.len() {
        let q1 = a.len() / 2;
        let pivot = &a[q1];
        let q2 = b.partition_point(|x| cmp(x, pivot) == Ordering::Less);
        let q3 = q1 + q2;
        dst[q3] = pivot.clone();
        let (left, right) = dst.split_at_mut(q3);
        dac_recurse(&a[..q1], &b[..q2], left, threshold, cmp);
        dac_recurse(&a[q1 + 1..], &b[q2..], &mut right[1..], threshold, cmp);
    } else {
        let q2 = b.len() / 2;
        let pivot = &b[q2];
        let q1 = a.partition_point(|x| cmp(x, pivot) != Ordering::Greater);
        let q3 = q1 + q2;
        dst[q3] = pivot.clone();
        let (left, right) = dst.split_at_mut(q3);
        dac_recurse(&a[..q1], &b[..q2], left, threshold, cmp);
        dac_recurse(&a[q1..], &b[q2 + 1..], &mut right[1..], threshold, cmp);
    }
}

fn dac_recurse_par<T, F>(a: &[T], b: &[T], dst: &mut [T], threshold: usize, cmp: &F)
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    if a.len() + b.len() <= threshold {
        merge_runs(a, b, dst, &mut |x: &T, y: &T| cmp(x, y));
        return;
    }
    if a.len() >= b.len() {
        let q1 = a.len() / 2;
        let pivot = &a[q1];
        let q2 = b.partition_point(|x| cmp(x, pivot) == Ordering::Less);
        let q3 = q1 + q2;
        dst[q3] = pivot.clone();
        let (left, right) = dst.split_at_mut(q3);
        // Disjoint sources, disjoint destinations: a panic in either
        // branch propagates out of the join and aborts the merge.
        rayon::join(
            || dac_recurse_par(&a[..q1], &b[..q2], left, threshold, cmp),
            || dac_recurse_par(&a[q1 + 1..], &b[q2..], &mut right[1..], threshold, cmp),
        );
    } else {
        let q2 = b.len() / 2;
        let pivot = &b[q2];
        let q1 = a.partition_point(|x| cmp(x, pivot) != Ordering::Greater);
        let q3 = q1 + q2;
        dst[q3] = pivot.clone();
        let (left, right) = dst.split_at_mut(q3);
        rayon::join(
            || dac_recurse_par(&a[..q1], &b[..q2], left, threshold, cmp),
            || dac_recurse_par(&a[q1..], &b[q2 + 1..], &mut right[1..], threshold, cmp),
        );
    }
}

/// Sequential divide-and-conquer merge with an explicit threshold.
/// Output is identical to `merge_two_by` for every threshold value.
pub fn merge_dac_by<T, F>(
    a: &[T],
    b: &[T],
    dst: &mut [T],
    threshold: usize,
    cmp: F,
) -> Result<(), MergeError>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    check_dst_len(a.len() + b.len(), dst.len())?;
    dac_recurse(a, b, dst, threshold, &cmp);
    Ok(())
}

/// `merge_dac_by` with the natural ordering and the default threshold.
pub fn merge_dac<T: Ord + Clone>(a: &[T], b: &[T], dst: &mut [T]) -> Result<(), MergeError> {
    merge_dac_by(a, b, dst, MERGE_DAC_THRESHOLD, T::cmp)
}

/// Fork-join parallel divide-and-conquer merge.
///
/// `parallelism` is advisory: `<= 0` uses all available execution units,
/// `1` runs fully sequential, `> 1` bounds the pool to that many threads.
/// Recursion depth is bounded by `log2(total / threshold)`; each call
/// spawns at most two sub-tasks and joins both before returning, so an
/// error in either branch fails the whole operation.
pub fn merge_dac_parallel_by<T, F>(
    a: &[T],
    b: &[T],
    dst: &mut [T],
    threshold: usize,
    parallelism: i32,
    cmp: F,
) -> Result<(), MergeError>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    check_dst_len(a.len() + b.len(), dst.len())?;
    if parallelism == 1 {
        dac_recurse(a, b, dst, threshold, &cmp);
        return Ok(());
    }
    // num_threads(0) lets rayon size the pool to the available units.
    let threads = if parallelism <= 0 { 0 } else { parallelism as usize };
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    pool.install(|| dac_recurse_par(a, b, dst, threshold, &cmp));
    Ok(())
}

/// `merge_dac_parallel_by` with the natural ordering and the default
/// threshold.
pub fn merge_dac_parallel<T>(
    a: &[T],
    b: &[T],
    dst: &mut [T],
    parallelism: i32,
) -> Result<(), MergeError>
where
    T: Ord + Clone + Send + Sync,
{
    merge_dac_parallel_by(a, b, dst, MERGE_DAC_THRESHOLD, parallelism, T::cmp)
}
