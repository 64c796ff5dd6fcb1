use super::*;
use crate::key::SortableKey;

use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng;

/// Reference digit extraction: transform first, then shift and mask.
/// Every counting path must agree with this, bin for bin.
fn reference_histograms<K: SortableKey>(src: &[K], width: u32) -> Vec<CountTable> {
    let digits = ((K::KEY_BITS + width - 1) / width) as usize;
    let mask = (1u64 << width) - 1;
    let mut count = vec![vec![0u32; 1usize << width]; digits];
    for &v in src {
        let bits = v.to_sortable_bits();
        for d in 0..digits {
            count[d][((bits >> (width * d as u32)) & mask) as usize] += 1;
        }
    }
    count
}

fn random_u64s(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.r#gen()).collect()
}

fn random_i64s(n: usize, seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.r#gen()).collect()
}

fn random_f64s(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (rng.r#gen::<f64>() - 0.5) * 1e12)
        .collect()
}

#[test]
fn test_width8_literal_scenario() {
    let input: [u32; 4] = [3, 3, 7, 0];
    let tables = digit_histograms(&input, 0..4, 8).unwrap();
    assert_eq!(tables.len(), 4);
    assert_eq!(tables[0][3], 2);
    assert_eq!(tables[0][7], 1);
    assert_eq!(tables[0][0], 1);
    let others: u32 = tables[0]
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != 0 && i != 3 && i != 7)
        .map(|(_, &c)| c)
        .sum();
    assert_eq!(others, 0);
    // All four values have zero upper bytes.
    for d in 1..4 {
        assert_eq!(tables[d][0], 4);
    }
}

#[test]
fn test_count_conservation_all_widths() {
    let input = random_u64s(1000, 7);
    for width in [1, 3, 5, 7, 8, 9, 10, 11, 12, 13, 16, 17, 24] {
        let tables = digit_histograms(&input, 0..input.len(), width).unwrap();
        assert_eq!(tables.len(), (64 + width as usize - 1) / width as usize);
        for (d, table) in tables.iter().enumerate() {
            let total: u64 = table.iter().map(|&c| c as u64).sum();
            assert_eq!(total, 1000, "width {width} digit {d}");
        }
    }
}

#[test]
fn test_count_conservation_subrange() {
    let input = random_i64s(500, 11);
    let tables = digit_histograms(&input, 100..347, 8).unwrap();
    for table in &tables {
        let total: u32 = table.iter().sum();
        assert_eq!(total, 247);
    }
}

#[test]
fn test_specialization_equivalence_u32() {
    let mut rng = StdRng::seed_from_u64(3);
    let input: Vec<u32> = (0..2000).map(|_| rng.r#gen()).collect();
    for width in [8, 9, 10, 11, 12, 13, 16] {
        let fast = digit_histograms(&input, 0..input.len(), width).unwrap();
        let reference = reference_histograms(&input, width);
        assert_eq!(fast, reference, "width {width}");
    }
}

#[test]
fn test_specialization_equivalence_u64() {
    let input = random_u64s(2000, 5);
    for width in [8, 9, 10, 11, 12, 13, 16] {
        let fast = digit_histograms(&input, 0..input.len(), width).unwrap();
        assert_eq!(fast, reference_histograms(&input, width), "width {width}");
    }
}

#[test]
fn test_specialization_equivalence_signed_and_float() {
    let ints = random_i64s(1500, 21);
    let floats = random_f64s(1500, 22);
    for width in [8, 9, 11, 13, 16] {
        assert_eq!(
            digit_histograms(&ints, 0..ints.len(), width).unwrap(),
            reference_histograms(&ints, width)
        );
        assert_eq!(
            digit_histograms(&floats, 0..floats.len(), width).unwrap(),
            reference_histograms(&floats, width)
        );
    }
}

#[test]
fn test_byte_histograms_match_width8() {
    let input = random_i64s(800, 9);
    assert_eq!(
        byte_histograms(&input, 0..input.len()).unwrap(),
        digit_histograms(&input, 0..input.len(), 8).unwrap()
    );
}

#[test]
fn test_single_digit_matches_full_tables() {
    let input = random_u64s(600, 13);
    let tables = digit_histograms(&input, 0..input.len(), 8).unwrap();
    for d in 0..8u32 {
        let one = single_digit_histogram(&input, 0..input.len(), 8 * d, 8).unwrap();
        assert_eq!(one, tables[d as usize]);
    }
}

#[test]
fn test_raw_byte_shortcut_matches_transform_first_i64() {
    let mut input = random_i64s(700, 17);
    input.extend_from_slice(&[i64::MIN, -1, 0, 1, i64::MAX]);
    let n = input.len();
    for d in 0..8u32 {
        let shift = 8 * d;
        let raw = single_byte_histogram_raw_i64(&input, 0..n, shift).unwrap();
        let transformed = single_byte_histogram(&input, 0..n, shift).unwrap();
        assert_eq!(raw, transformed, "shift {shift}");
    }
}

#[test]
fn test_raw_byte_shortcut_matches_transform_first_i32() {
    let mut rng = StdRng::seed_from_u64(19);
    let mut input: Vec<i32> = (0..700).map(|_| rng.r#gen()).collect();
    input.extend_from_slice(&[i32::MIN, -1, 0, 1, i32::MAX]);
    let n = input.len();
    for d in 0..4u32 {
        let shift = 8 * d;
        let raw = single_byte_histogram_raw_i32(&input, 0..n, shift).unwrap();
        let transformed = single_byte_histogram(&input, 0..n, shift).unwrap();
        assert_eq!(raw, transformed, "shift {shift}");
    }
}

#[test]
fn test_raw_byte_shortcut_matches_transform_first_f64() {
    let mut input = random_f64s(700, 23);
    input.extend_from_slice(&[f64::NEG_INFINITY, -0.0, 0.0, f64::INFINITY, f64::MIN, f64::MAX]);
    let n = input.len();
    for d in 0..8u32 {
        let shift = 8 * d;
        let raw = single_byte_histogram_raw_f64(&input, 0..n, shift).unwrap();
        let transformed = single_byte_histogram(&input, 0..n, shift).unwrap();
        assert_eq!(raw, transformed, "shift {shift}");
    }
}

#[test]
fn test_raw_byte_shortcut_matches_transform_first_f32() {
    let mut rng = StdRng::seed_from_u64(29);
    let mut input: Vec<f32> = (0..700).map(|_| (rng.r#gen::<f32>() - 0.5) * 1e6).collect();
    input.extend_from_slice(&[f32::NEG_INFINITY, -0.0, 0.0, f32::INFINITY]);
    let n = input.len();
    for d in 0..4u32 {
        let shift = 8 * d;
        let raw = single_byte_histogram_raw_f32(&input, 0..n, shift).unwrap();
        let transformed = single_byte_histogram(&input, 0..n, shift).unwrap();
        assert_eq!(raw, transformed, "shift {shift}");
    }
}

#[test]
fn test_raw_nbit_top_digit_xor_matches_transform_first() {
    let mut input = random_i64s(900, 31);
    input.extend_from_slice(&[i64::MIN, -1, 0, 1, i64::MAX]);
    let n = input.len();
    for width in [9u32, 10, 11, 12, 13] {
        // Top digit: the XOR-with-half-bins correction path.
        let top_shift = 64 - width;
        let raw = single_digit_histogram_raw_i64(&input, 0..n, top_shift, width).unwrap();
        let transformed = single_digit_histogram(&input, 0..n, top_shift, width).unwrap();
        assert_eq!(raw, transformed, "top digit, width {width}");

        // A digit position below the sign bit: the plain mask path.
        let raw = single_digit_histogram_raw_i64(&input, 0..n, width, width).unwrap();
        let transformed = single_digit_histogram(&input, 0..n, width, width).unwrap();
        assert_eq!(raw, transformed, "low digit, width {width}");
    }
}

#[test]
fn test_width_out_of_range() {
    let input: [u32; 3] = [1, 2, 3];
    assert_eq!(
        digit_histograms(&input, 0..3, 0),
        Err(HistogramError::WidthOutOfRange { width: 0, bits: 32 })
    );
    assert_eq!(
        digit_histograms(&input, 0..3, 33),
        Err(HistogramError::WidthOutOfRange {
            width: 33,
            bits: 32
        })
    );
    // Accepted widths never exceed what a count table can address.
    let wide: [u64; 1] = [0];
    assert_eq!(
        digit_histograms(&wide, 0..1, 40),
        Err(HistogramError::WidthOutOfRange {
            width: 40,
            bits: 64
        })
    );
}

#[test]
fn test_digit_out_of_range() {
    let input: [i64; 2] = [1, 2];
    assert_eq!(
        single_byte_histogram(&input, 0..2, 57),
        Err(HistogramError::DigitOutOfRange {
            shift: 57,
            width: 8,
            bits: 64
        })
    );
    assert!(single_digit_histogram_raw_i64(&input, 0..2, 60, 9).is_err());
}

#[test]
fn test_invalid_bounds() {
    let input: [u32; 4] = [1, 2, 3, 4];
    assert_eq!(
        digit_histograms(&input, 0..5, 8),
        Err(HistogramError::InvalidBounds {
            start: 0,
            end: 5,
            len: 4
        })
    );
}

#[test]
fn test_empty_and_inverted_ranges_yield_zero_tables() {
    let input: [u32; 4] = [9, 9, 9, 9];
    for range in [2..2, 3..1] {
        let tables = digit_histograms(&input, range, 8).unwrap();
        assert_eq!(tables.len(), 4);
        for table in &tables {
            assert!(table.iter().all(|&c| c == 0));
        }
    }
}

#[test]
fn test_by_key_projection_matches_direct() {
    struct Record {
        key: u32,
        _payload: &'static str,
    }
    let records = [
        Record { key: 0x0102_0304, _payload: "a" },
        Record { key: 0xFF00_0001, _payload: "b" },
        Record { key: 0x0102_0304, _payload: "c" },
    ];
    let keys: Vec<u32> = records.iter().map(|r| r.key).collect();
    let projected =
        byte_histograms_by_key(&records, 0..records.len(), 32, |r| r.key as u64).unwrap();
    let direct = byte_histograms(&keys, 0..keys.len()).unwrap();
    assert_eq!(projected, direct);
}

#[test]
fn test_by_key_rejects_bad_key_width() {
    let input: [u8; 1] = [0];
    for bits in [0u32, 12, 65] {
        assert_eq!(
            byte_histograms_by_key(&input, 0..1, bits, |&b| b as u64),
            Err(HistogramError::InvalidKeyWidth { bits })
        );
    }
}

#[test]
fn test_quanta_partials_sum_to_whole() {
    let input = random_u64s(1000, 41);
    let partials = byte_histograms_per_quanta(&input, 256).unwrap();
    assert_eq!(partials.len(), 4); // 256 + 256 + 256 + 232
    let whole = byte_histograms(&input, 0..input.len()).unwrap();
    let combined = reduce_histograms(partials.clone()).unwrap();
    assert_eq!(combined, whole);
    let tree_combined = tree_reduce_histograms(partials).unwrap();
    assert_eq!(tree_combined, whole);
}

#[test]
fn test_quanta_exact_division_and_short_tail() {
    let input = random_i64s(512, 43);
    assert_eq!(byte_histograms_per_quanta(&input, 128).unwrap().len(), 4);
    assert_eq!(byte_histograms_per_quanta(&input, 100).unwrap().len(), 6);
    assert_eq!(
        byte_histograms_per_quanta(&input, 0),
        Err(HistogramError::ZeroQuanta)
    );
}

#[test]
fn test_reduce_empty_partials() {
    assert_eq!(reduce_histograms(Vec::new()), None);
    assert_eq!(tree_reduce_histograms(Vec::new()), None);
}

#[test]
fn test_presortedness_counts_pairs() {
    let sorted: Vec<i64> = (0..100).collect();
    let (_, pairs) = byte_histograms_with_presortedness(&sorted, 0..100).unwrap();
    assert_eq!(pairs, 99);

    let reversed: Vec<i64> = (0..100).rev().collect();
    let (_, pairs) = byte_histograms_with_presortedness(&reversed, 0..100).unwrap();
    assert_eq!(pairs, 0);

    // Equal adjacent elements count as non-decreasing.
    let mixed: [i64; 5] = [1, 1, 0, 2, 2];
    let (tables, pairs) = byte_histograms_with_presortedness(&mixed, 0..5).unwrap();
    assert_eq!(pairs, 3);
    assert_eq!(tables, byte_histograms(&mixed, 0..5).unwrap());
}

#[test]
fn test_presortedness_trivial_inputs() {
    let input: [i64; 3] = [5, 4, 3];
    let (_, pairs) = byte_histograms_with_presortedness(&input, 0..0).unwrap();
    assert_eq!(pairs, 0);
    let (_, pairs) = byte_histograms_with_presortedness(&input, 1..2).unwrap();
    assert_eq!(pairs, 0);
}

proptest! {
    #[test]
    fn prop_count_conservation(input in prop::collection::vec(any::<u64>(), 0..200), width in 1u32..=20) {
        let tables = digit_histograms(&input, 0..input.len(), width).unwrap();
        for table in &tables {
            let total: u64 = table.iter().map(|&c| c as u64).sum();
            prop_assert_eq!(total, input.len() as u64);
        }
    }

    #[test]
    fn prop_specialized_widths_match_reference(input in prop::collection::vec(any::<u64>(), 0..200)) {
        for width in [8u32, 9, 10, 11, 12, 13, 16] {
            let fast = digit_histograms(&input, 0..input.len(), width).unwrap();
            prop_assert_eq!(fast, reference_histograms(&input, width));
        }
    }

    #[test]
    fn prop_raw_i64_top_digit_matches(input in prop::collection::vec(any::<i64>(), 0..200), width in 1u32..=16) {
        let shift = 64 - width;
        let raw = single_digit_histogram_raw_i64(&input, 0..input.len(), shift, width).unwrap();
        let transformed = single_digit_histogram(&input, 0..input.len(), shift, width).unwrap();
        prop_assert_eq!(raw, transformed);
    }
}
