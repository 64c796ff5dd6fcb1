/// Byte-component histograms: the 8-bit-digit fast path.
///
/// One pass over the input counts every byte digit of every key, so an
/// 8-bit-digit radix sort needs exactly one scan for all of its counting.
use std::ops::Range;

use crate::key::SortableKey;

use super::{CountTable, HistogramError, checked_slice};

const BYTE_BINS: usize = 256;

fn byte_tables(digits: usize) -> Vec<CountTable> {
    vec![vec![0u32; BYTE_BINS]; digits]
}

#[inline]
fn tally_bytes_from_bits(bits: u64, count: &mut [CountTable]) {
    for (d, table) in count.iter_mut().enumerate() {
        table[((bits >> (8 * d)) & 0xFF) as usize] += 1;
    }
}

/// Count all byte digits of every key in `input[range]` in a single pass.
///
/// Returns `KEY_BITS / 8` tables of 256 bins each. Digits are taken from
/// the order-preserving transform, so signed and float keys land in
/// sign-correct bins at every position.
pub fn byte_histograms<K: SortableKey>(
    input: &[K],
    range: Range<usize>,
) -> Result<Vec<CountTable>, HistogramError> {
    let src = checked_slice(input, range)?;
    let mut count = byte_tables((K::KEY_BITS / 8) as usize);
    for &v in src {
        tally_bytes_from_bits(v.to_sortable_bits(), &mut count);
    }
    Ok(count)
}

/// Byte histograms for generic element types via a caller-supplied key
/// projection. `key_bits` names the meaningful width of the projected key
/// and must be a non-zero multiple of 8 no larger than 64; the projection
/// itself must already be order-preserving.
pub fn byte_histograms_by_key<T, F>(
    input: &[T],
    range: Range<usize>,
    key_bits: u32,
    get_key: F,
) -> Result<Vec<CountTable>, HistogramError>
where
    F: Fn(&T) -> u64,
{
    if key_bits == 0 || key_bits > 64 || key_bits % 8 != 0 {
        return Err(HistogramError::InvalidKeyWidth { bits: key_bits });
    }
    let src = checked_slice(input, range)?;
    let mut count = byte_tables((key_bits / 8) as usize);
    for v in src {
        tally_bytes_from_bits(get_key(v), &mut count);
    }
    Ok(count)
}

/// Chunked counting for parallel histogramming: the input is cut into
/// fixed-size work quanta (the final quanta may be shorter) and one
/// independent table set is produced per quanta.
///
/// This function does not combine across quanta — callers sum the partials
/// explicitly with `reduce_histograms` or `tree_reduce_histograms`, or run
/// each quanta in its own task and reduce afterwards.
pub fn byte_histograms_per_quanta<K: SortableKey>(
    input: &[K],
    work_quanta: usize,
) -> Result<Vec<Vec<CountTable>>, HistogramError> {
    if work_quanta == 0 {
        return Err(HistogramError::ZeroQuanta);
    }
    let digits = (K::KEY_BITS / 8) as usize;
    let mut partials = Vec::with_capacity(input.len().div_ceil(work_quanta));
    for chunk in input.chunks(work_quanta) {
        let mut count = byte_tables(digits);
        for &v in chunk {
            tally_bytes_from_bits(v.to_sortable_bits(), &mut count);
        }
        partials.push(count);
    }
    Ok(partials)
}

/// Byte histograms plus a same-pass pre-sortedness tally: the number of
/// adjacent element pairs already in non-decreasing key order. Costs one
/// extra comparison per element after the first; a cheap signal for
/// callers choosing between algorithms.
pub fn byte_histograms_with_presortedness<K: SortableKey>(
    input: &[K],
    range: Range<usize>,
) -> Result<(Vec<CountTable>, usize), HistogramError> {
    let src = checked_slice(input, range)?;
    let mut count = byte_tables((K::KEY_BITS / 8) as usize);
    let mut sorted_pairs = 0usize;
    let mut prev = 0u64;
    for (i, &v) in src.iter().enumerate() {
        let bits = v.to_sortable_bits();
        tally_bytes_from_bits(bits, &mut count);
        if i > 0 && prev <= bits {
            sorted_pairs += 1;
        }
        prev = bits;
    }
    Ok((count, sorted_pairs))
}

/// One byte digit of the transformed key, at the given right-shift.
pub fn single_byte_histogram<K: SortableKey>(
    input: &[K],
    range: Range<usize>,
    shift: u32,
) -> Result<CountTable, HistogramError> {
    if shift + 8 > K::KEY_BITS {
        return Err(HistogramError::DigitOutOfRange {
            shift,
            width: 8,
            bits: K::KEY_BITS,
        });
    }
    let src = checked_slice(input, range)?;
    let mut count = vec![0u32; BYTE_BINS];
    for &v in src {
        count[((v.to_sortable_bits() >> shift) & 0xFF) as usize] += 1;
    }
    Ok(count)
}

macro_rules! raw_signed_byte_histogram {
    ($name:ident, $t:ty as $u:ty, $bits:expr) => {
        /// One byte digit over raw two's-complement bits. Low digits come
        /// straight from the raw bytes; the sign digit folds the key
        /// transform in by XOR-ing the bin index with 128 instead of
        /// materializing transformed keys. Byte-aligned shifts place every
        /// element exactly as the transform-first path does.
        pub fn $name(
            input: &[$t],
            range: Range<usize>,
            shift: u32,
        ) -> Result<CountTable, HistogramError> {
            if shift + 8 > $bits {
                return Err(HistogramError::DigitOutOfRange {
                    shift,
                    width: 8,
                    bits: $bits,
                });
            }
            let src = checked_slice(input, range)?;
            let mut count = vec![0u32; BYTE_BINS];
            if shift != $bits - 8 {
                for &v in src {
                    count[((v as $u >> shift) & 0xFF) as usize] += 1;
                }
            } else {
                for &v in src {
                    count[((v as $u >> shift) as usize) ^ 128] += 1;
                }
            }
            Ok(count)
        }
    };
}

raw_signed_byte_histogram!(single_byte_histogram_raw_i32, i32 as u32, 32);
raw_signed_byte_histogram!(single_byte_histogram_raw_i64, i64 as u64, 64);

/// One byte digit over raw f32 bit patterns. Non-negative values pass
/// through with only the sign digit's bin index flipped; negative values
/// are fully inverted so larger magnitudes sort first.
pub fn single_byte_histogram_raw_f32(
    input: &[f32],
    range: Range<usize>,
    shift: u32,
) -> Result<CountTable, HistogramError> {
    if shift + 8 > 32 {
        return Err(HistogramError::DigitOutOfRange {
            shift,
            width: 8,
            bits: 32,
        });
    }
    let src = checked_slice(input, range)?;
    let mut count = vec![0u32; BYTE_BINS];
    if shift != 24 {
        for &v in src {
            let bits = v.to_bits();
            let digit = if bits & 0x8000_0000 == 0 {
                bits >> shift // non-negative: don't flip anything
            } else {
                (!bits) >> shift // negative: flip the whole value
            };
            count[(digit & 0xFF) as usize] += 1;
        }
    } else {
        for &v in src {
            let bits = v.to_bits();
            let digit = if bits & 0x8000_0000 == 0 {
                (bits >> 24) ^ 128 // non-negative: flip just the sign bit
            } else {
                (!bits) >> 24 // negative: flip everything, sign bit included
            };
            count[digit as usize] += 1;
        }
    }
    Ok(count)
}

/// `single_byte_histogram_raw_f32` for f64 bit patterns.
pub fn single_byte_histogram_raw_f64(
    input: &[f64],
    range: Range<usize>,
    shift: u32,
) -> Result<CountTable, HistogramError> {
    if shift + 8 > 64 {
        return Err(HistogramError::DigitOutOfRange {
            shift,
            width: 8,
            bits: 64,
        });
    }
    let src = checked_slice(input, range)?;
    let mut count = vec![0u32; BYTE_BINS];
    if shift != 56 {
        for &v in src {
            let bits = v.to_bits();
            let digit = if bits & 0x8000_0000_0000_0000 == 0 {
                bits >> shift
            } else {
                (!bits) >> shift
            };
            count[(digit & 0xFF) as usize] += 1;
        }
    } else {
        for &v in src {
            let bits = v.to_bits();
            let digit = if bits & 0x8000_0000_0000_0000 == 0 {
                (bits >> 56) ^ 128
            } else {
                (!bits) >> 56
            };
            count[digit as usize] += 1;
        }
    }
    Ok(count)
}
