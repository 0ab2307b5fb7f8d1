//! Combining two raw generator words into one.

/// `(a * b) XOR (a - b)` on 64-bit words, wrapping on overflow.
pub fn combine_words(a: u64, b: u64) -> u64 {
    a.wrapping_mul(b) ^ a.wrapping_sub(b)
}
