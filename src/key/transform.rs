/// A primitive numeric type with an order-preserving mapping to `u64`.
///
/// `to_sortable_bits` returns a key whose unsigned comparison matches the
/// natural ordering of the values: for integers, `a < b` iff
/// `a.to_sortable_bits() < b.to_sortable_bits()`; for floats the key order
/// is IEEE total order, which places `-0.0` just below `0.0` (NaN
/// placement is unspecified).
///
/// Only the low `KEY_BITS` bits of the result are meaningful; the rest are
/// zero. `raw_bits` exposes the untransformed pattern for digit-extraction
/// shortcuts that fold the sign correction into the top digit instead of
/// materializing transformed keys (see `histogram`).
pub trait SortableKey: Copy + Send + Sync + 'static {
    /// Number of meaningful bits in the key.
    const KEY_BITS: u32;

    /// The value's bit pattern, zero-extended to 64 bits.
    fn raw_bits(self) -> u64;

    /// Order-preserving transform to an unsigned key.
    fn to_sortable_bits(self) -> u64;
}

macro_rules! unsigned_sortable_key {
    ($($t:ty => $bits:expr),+ $(,)?) => {$(
        impl SortableKey for $t {
            const KEY_BITS: u32 = $bits;

            #[inline(always)]
            fn raw_bits(self) -> u64 {
                self as u64
            }

            #[inline(always)]
            fn to_sortable_bits(self) -> u64 {
                self as u64
            }
        }
    )+};
}

// Unsigned integers: bit pattern already orders correctly.
unsigned_sortable_key!(u8 => 8, u16 => 16, u32 => 32, u64 => 64);

macro_rules! signed_sortable_key {
    ($($t:ty as $u:ty => $bits:expr),+ $(,)?) => {$(
        impl SortableKey for $t {
            const KEY_BITS: u32 = $bits;

            #[inline(always)]
            fn raw_bits(self) -> u64 {
                self as $u as u64
            }

            #[inline(always)]
            fn to_sortable_bits(self) -> u64 {
                // Flipping the sign bit shifts the two's-complement range
                // [MIN, MAX] onto [0, 2^bits - 1] in order.
                (self as $u as u64) ^ (1 << ($bits - 1))
            }
        }
    )+};
}

signed_sortable_key!(i8 as u8 => 8, i16 as u16 => 16, i32 as u32 => 32, i64 as u64 => 64);

impl SortableKey for f32 {
    const KEY_BITS: u32 = 32;

    #[inline(always)]
    fn raw_bits(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline(always)]
    fn to_sortable_bits(self) -> u64 {
        float_to_sortable_u32(self) as u64
    }
}

impl SortableKey for f64 {
    const KEY_BITS: u32 = 64;

    #[inline(always)]
    fn raw_bits(self) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn to_sortable_bits(self) -> u64 {
        float_to_sortable_u64(self)
    }
}

/// Convert f64 to a u64 whose natural ordering matches float ordering.
/// This enables branchless u64::cmp instead of f64::partial_cmp.
/// Non-negative values get the sign bit set, pushing them above all
/// negatives; negative values are fully inverted so larger magnitudes
/// sort first. NaN ordering is unspecified.
#[inline]
pub fn float_to_sortable_u64(f: f64) -> u64 {
    let bits = f.to_bits();
    if (bits >> 63) == 0 {
        bits ^ 0x8000_0000_0000_0000 // non-negative: flip sign bit
    } else {
        !bits // negative: flip all bits
    }
}

/// `float_to_sortable_u64` for f32.
#[inline]
pub fn float_to_sortable_u32(f: f32) -> u32 {
    let bits = f.to_bits();
    if (bits >> 31) == 0 {
        bits ^ 0x8000_0000
    } else {
        !bits
    }
}
