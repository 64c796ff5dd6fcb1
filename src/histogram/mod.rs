/// Digit-counting engine for the counting phase of LSD radix sort.
///
/// Every counting function scans a slice once and produces one count table
/// per digit position. Digits are extracted from order-preserving keys
/// (see `crate::key`), so the tables can be prefix-summed directly into
/// bucket offsets by a sort driver. The `*_raw_*` variants skip the key
/// transform and fold the sign correction into the most-significant digit
/// instead; they are bin-for-bin identical to the transform-first paths.
///
/// Counting itself is sequential by contract: the work-quanta variant
/// produces independent partial tables for a caller-scheduled reduction
/// (`reduce_histograms` / `tree_reduce_histograms`).
use std::ops::Range;

use thiserror::Error;

mod byte;
mod nbits;

#[cfg(test)]
mod tests;

pub use self::byte::*;
pub use self::nbits::*;

/// Counts per bin for one digit position. Length is `2^width`.
pub type CountTable = Vec<u32>;

/// Argument-range failures of the counting engine. All are raised before
/// any counting happens; no partial tables are ever returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistogramError {
    #[error("digit width {width} out of range for {bits}-bit keys")]
    WidthOutOfRange { width: u32, bits: u32 },

    #[error("digit at shift {shift} with width {width} exceeds {bits}-bit keys")]
    DigitOutOfRange { shift: u32, width: u32, bits: u32 },

    #[error("key width {bits} must be a non-zero multiple of 8 no larger than 64")]
    InvalidKeyWidth { bits: u32 },

    #[error("range {start}..{end} out of bounds for slice of length {len}")]
    InvalidBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("work quanta length must be non-zero")]
    ZeroQuanta,
}

/// Validate a scan range against the input slice.
/// An inverted or empty range is not an error: it selects zero elements,
/// so every table comes back all-zero.
pub(crate) fn checked_slice<T>(
    input: &[T],
    range: Range<usize>,
) -> Result<&[T], HistogramError> {
    if range.end > input.len() {
        return Err(HistogramError::InvalidBounds {
            start: range.start,
            end: range.end,
            len: input.len(),
        });
    }
    if range.start >= range.end {
        return Ok(&[]);
    }
    Ok(&input[range])
}

/// Element-wise sum of one partial table set into an accumulator.
/// Shapes must match (same digit count, same bin count per digit).
pub fn add_histograms(acc: &mut [CountTable], part: &[CountTable]) {
    assert_eq!(acc.len(), part.len(), "digit count mismatch");
    for (a, p) in acc.iter_mut().zip(part) {
        assert_eq!(a.len(), p.len(), "bin count mismatch");
        for (av, pv) in a.iter_mut().zip(p) {
            *av += *pv;
        }
    }
}

/// Sequential fold of per-quanta partial tables into one table set.
/// Returns `None` for an empty partial list.
pub fn reduce_histograms(parts: Vec<Vec<CountTable>>) -> Option<Vec<CountTable>> {
    let mut iter = parts.into_iter();
    let mut acc = iter.next()?;
    for part in iter {
        add_histograms(&mut acc, &part);
    }
    Some(acc)
}

/// Tree reduction of per-quanta partial tables on the rayon pool.
/// Same result as `reduce_histograms`; useful when the quanta count is
/// large enough that combining dominates.
pub fn tree_reduce_histograms(parts: Vec<Vec<CountTable>>) -> Option<Vec<CountTable>> {
    use rayon::prelude::*;

    parts.into_par_iter().reduce_with(|mut acc, part| {
        add_histograms(&mut acc, &part);
        acc
    })
}
