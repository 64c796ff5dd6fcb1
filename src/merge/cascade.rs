/// Span-cascade driver: bottom-up combination of pre-sorted runs.
///
/// Adjacent span pairs are merged from the current buffer into the other,
/// halving the span count each pass; an unpaired trailing span is copied
/// through unchanged. After the final pass the single remaining span is
/// copied back into the original buffer if it ended up in the scratch one,
/// so the result always lands in `src`. Total work is O(n log k) for k
/// initial spans.
use std::cmp::Ordering;

use super::core::merge_runs;
use super::{MergeError, check_dst_len};

/// A contiguous, internally non-decreasing run inside a shared slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortedSpan {
    pub start: usize,
    pub len: usize,
}

impl SortedSpan {
    pub fn new(start: usize, len: usize) -> Self {
        SortedSpan { start, len }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// Collapse an ordered list of disjoint, contiguous sorted spans over
/// `src` into one sorted run, using `dst` as the alternating scratch
/// buffer. The merged result is left in `src`; `dst`'s final contents are
/// unspecified.
///
/// Spans must be listed in position order and jointly cover the range
/// being merged with no gaps. An empty span list is a no-op. Fails with
/// `SizeMismatch` when the buffers differ in length.
pub fn merge_spans_by<T, F>(
    src: &mut [T],
    spans: &[SortedSpan],
    dst: &mut [T],
    mut cmp: F,
) -> Result<(), MergeError>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    check_dst_len(src.len(), dst.len())?;
    if spans.is_empty() {
        return Ok(());
    }

    let mut current: Vec<SortedSpan> = spans.to_vec();
    let mut in_src = true;
    while current.len() > 1 {
        let mut next = Vec::with_capacity(current.len() / 2 + 1);
        let (from, to): (&[T], &mut [T]) = if in_src {
            (&*src, &mut *dst)
        } else {
            (&*dst, &mut *src)
        };

        let pairs = current.len() / 2;
        for p in 0..pairs {
            let s1 = current[2 * p];
            let s2 = current[2 * p + 1];
            let out = s1.start..s1.start + s1.len + s2.len;
            merge_runs(&from[s1.range()], &from[s2.range()], &mut to[out], &mut cmp);
            next.push(SortedSpan::new(s1.start, s1.len + s2.len));
        }
        // Odd trailing span: carried into the other buffer unchanged.
        if current.len() % 2 == 1 {
            let s = current[current.len() - 1];
            to[s.range()].clone_from_slice(&from[s.range()]);
            next.push(s);
        }

        current = next;
        in_src = !in_src;
    }

    // The surviving span must end up in the original buffer.
    if !in_src {
        let s = current[0];
        src[s.range()].clone_from_slice(&dst[s.range()]);
    }
    Ok(())
}

/// `merge_spans_by` with the natural ordering.
pub fn merge_spans<T: Ord + Clone>(
    src: &mut [T],
    spans: &[SortedSpan],
    dst: &mut [T],
) -> Result<(), MergeError> {
    merge_spans_by(src, spans, dst, T::cmp)
}
