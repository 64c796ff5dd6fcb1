/// Width-parameterized digit histograms.
///
/// Four extraction paths share one contract and must stay bit-identical:
/// byte decomposition for width 8, word decomposition for width 16,
/// precomputed per-position masks for the irregular widths 9–13, and a
/// generic shift-and-mask fallback for every other legal width. The tests
/// cross-check each specialization against the fallback.
use std::ops::Range;

use crate::key::SortableKey;

use super::{CountTable, HistogramError, checked_slice};

/// Widest digit the engine accepts; a count table must stay allocatable.
const MAX_DIGIT_WIDTH: u32 = 31;

/// Most digit positions any accepted width can produce (64-bit keys cut
/// into 1-bit digits).
const MAX_DIGITS: usize = 64;

fn check_width(width: u32, key_bits: u32) -> Result<(), HistogramError> {
    if width == 0 || width > key_bits || width > MAX_DIGIT_WIDTH {
        return Err(HistogramError::WidthOutOfRange {
            width,
            bits: key_bits,
        });
    }
    Ok(())
}

/// Count every digit of every key in `input[range]` for the given digit
/// width. Returns `ceil(KEY_BITS / width)` tables of `2^width` bins each.
///
/// Fails with `WidthOutOfRange` when the width is zero or exceeds the
/// key's bit width.
pub fn digit_histograms<K: SortableKey>(
    input: &[K],
    range: Range<usize>,
    width: u32,
) -> Result<Vec<CountTable>, HistogramError> {
    check_width(width, K::KEY_BITS)?;
    let src = checked_slice(input, range)?;
    let bins = 1usize << width;
    let digits = ((K::KEY_BITS + width - 1) / width) as usize;
    let mut count: Vec<CountTable> = vec![vec![0u32; bins]; digits];

    match width {
        8 => tally_bytes(src, &mut count),
        16 => tally_words(src, &mut count),
        9..=13 => tally_masked::<K>(src, width, &mut count),
        _ => tally_generic(src, width, &mut count),
    }
    Ok(count)
}

/// Width 8: digits are exact bytes, no masking needed.
fn tally_bytes<K: SortableKey>(src: &[K], count: &mut [CountTable]) {
    let digits = count.len();
    for &v in src {
        let bits = v.to_sortable_bits();
        for d in 0..digits {
            count[d][(bits >> (8 * d)) as u8 as usize] += 1;
        }
    }
}

/// Width 16: digits are exact 16-bit words.
fn tally_words<K: SortableKey>(src: &[K], count: &mut [CountTable]) {
    let digits = count.len();
    for &v in src {
        let bits = v.to_sortable_bits();
        for d in 0..digits {
            count[d][(bits >> (16 * d)) as u16 as usize] += 1;
        }
    }
}

/// Widths 9–13: per-position masks and shifts are computed once up front,
/// so the inner loop is a fixed sequence of mask-shift-index steps. The
/// top position's mask is truncated to the key width, exactly like the
/// literal mask tables this path replaces.
fn tally_masked<K: SortableKey>(src: &[K], width: u32, count: &mut [CountTable]) {
    let digits = count.len();
    debug_assert!(digits <= 8, "width >= 9 yields at most 8 digit positions");
    let mut masks = [0u64; 8];
    let mut shifts = [0u32; 8];
    for d in 0..digits {
        let shift = width * d as u32;
        let top = (shift + width).min(K::KEY_BITS);
        masks[d] = (((1u128 << (top - shift)) - 1) as u64) << shift;
        shifts[d] = shift;
    }
    for &v in src {
        let bits = v.to_sortable_bits();
        for d in 0..digits {
            count[d][((bits & masks[d]) >> shifts[d]) as usize] += 1;
        }
    }
}

/// Generic fallback for any legal width: shift the digit down, then mask.
/// This is the reference the specialized paths are checked against.
fn tally_generic<K: SortableKey>(src: &[K], width: u32, count: &mut [CountTable]) {
    let digits = count.len();
    debug_assert!(digits <= MAX_DIGITS);
    let mask = (1u64 << width) - 1;
    for &v in src {
        let bits = v.to_sortable_bits();
        for d in 0..digits {
            count[d][((bits >> (width * d as u32)) & mask) as usize] += 1;
        }
    }
}

/// Count a single digit position of the transformed key: the digit is the
/// `width` bits starting at `shift`.
pub fn single_digit_histogram<K: SortableKey>(
    input: &[K],
    range: Range<usize>,
    shift: u32,
    width: u32,
) -> Result<CountTable, HistogramError> {
    check_width(width, K::KEY_BITS)?;
    if shift + width > K::KEY_BITS {
        return Err(HistogramError::DigitOutOfRange {
            shift,
            width,
            bits: K::KEY_BITS,
        });
    }
    let src = checked_slice(input, range)?;
    let mask = (1u64 << width) - 1;
    let mut count = vec![0u32; 1usize << width];
    for &v in src {
        count[((v.to_sortable_bits() >> shift) & mask) as usize] += 1;
    }
    Ok(count)
}

/// Single-digit counting over raw i64 bit patterns. Digits below the sign
/// bit come straight from the raw bits; the most-significant digit is
/// produced by XOR with half the bin count, which realizes the sign-flip
/// transform without materializing transformed keys. Placement is
/// identical to `single_digit_histogram` on the same inputs.
pub fn single_digit_histogram_raw_i64(
    input: &[i64],
    range: Range<usize>,
    shift: u32,
    width: u32,
) -> Result<CountTable, HistogramError> {
    check_width(width, 64)?;
    if shift + width > 64 {
        return Err(HistogramError::DigitOutOfRange {
            shift,
            width,
            bits: 64,
        });
    }
    let src = checked_slice(input, range)?;
    let bins = 1u64 << width;
    let mask = bins - 1;
    let half_of_bins = bins / 2;
    let mut count = vec![0u32; bins as usize];
    if shift != 64 - width {
        for &v in src {
            count[((v as u64 >> shift) & mask) as usize] += 1;
        }
    } else {
        // Top digit contains the sign bit: the XOR flips it, and the shift
        // already dropped every bit below the digit, so no mask is needed.
        for &v in src {
            count[((v as u64 >> shift) ^ half_of_bins) as usize] += 1;
        }
    }
    Ok(count)
}
