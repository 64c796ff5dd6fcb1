/// Order-preserving key transforms for radix sorting.
///
/// Radix sort works on unsigned bit patterns, so every supported primitive
/// is mapped to a `u64` whose *unsigned* ordering matches the natural
/// ordering of the original values. The mapping is a bijection on the
/// low `KEY_BITS` bits, so a sort driver can recover the original value
/// ordering from the transformed keys alone.
mod transform;


pub use self::transform::*;
