//! Hash functions the maps can be built with

/// A hash function mapping a key to an unsigned integer.
///
/// Maps store the function they were built with and reduce its output modulo their capacity, so
/// the result may be arbitrarily large.
pub type HashFn = fn(&str) -> u64;

/// Sums the byte values of the key.
///
/// Anagrams collide, which makes this a useful function for exercising collision handling.
#[must_use]
pub fn hash_function_1(key: &str) -> u64 {
    key.bytes().fold(0_u64, |hash, byte| hash.wrapping_add(u64::from(byte)))
}

/// Sums the byte values of the key, each weighted by its one-based position.
#[must_use]
pub fn hash_function_2(key: &str) -> u64 {
    key.bytes().zip(1_u64..).fold(0_u64, |hash, (byte, position)| {
        hash.wrapping_add(position.wrapping_mul(u64::from(byte)))
    })
}
