//! Five-round middle-square mixing of two 64-bit words.
//!
//! All arithmetic is on `u64` with wrapping semantics. Overflow is the point:
//! the finite-word mixing artifacts are what the harness measures, so this
//! must never be widened to arbitrary precision.

use serde::{Deserialize, Serialize};

/// How the round-4 word `t` and the round-5 word `x` are folded into the
/// final value.
///
/// The algorithm as first written used `t ** x`, which reads as
/// exponentiation but was most likely meant as XOR. Both are available and
/// the choice is carried into every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalFold {
    /// `t ^ x`
    #[default]
    Xor,
    /// `t.wrapping_pow(x)`
    Pow,
}

impl FinalFold {
    pub fn apply(self, t: u64, x: u64) -> u64 {
        match self {
            FinalFold::Xor => t ^ x,
            // x came out of a 32-bit right shift, so it fits in u32.
            FinalFold::Pow => t.wrapping_pow(x as u32),
        }
    }
}

impl std::fmt::Display for FinalFold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinalFold::Xor => f.write_str("xor"),
            FinalFold::Pow => f.write_str("pow"),
        }
    }
}

/// Every intermediate word of one mix, for inspection and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixTrace {
    /// `a * b`
    pub x0: u64,
    /// Additive term for rounds 1, 3 and 5.
    pub y: u64,
    /// Additive term for rounds 2 and 4.
    pub z: u64,
    /// `x` after the rotation closing each of rounds 1 to 4.
    pub rounds: [u64; 4],
    /// Round-4 `x` before its rotation.
    pub t: u64,
    /// Round-5 output, the upper half of `x*x + y`.
    pub last: u64,
}

fn square_add(x: u64, addend: u64) -> u64 {
    x.wrapping_mul(x).wrapping_add(addend)
}

/// Run the five rounds for first-role word `a` and second-role word `b`.
pub fn mix_trace(a: u64, b: u64) -> MixTrace {
    let x0 = a.wrapping_mul(b);
    let y = x0;
    let z = y.wrapping_add(b);

    let r1 = square_add(x0, y).rotate_left(32);
    let r2 = square_add(r1, z).rotate_left(32);
    let r3 = square_add(r2, y).rotate_left(32);
    let t = square_add(r3, z);
    let r4 = t.rotate_left(32);
    let last = square_add(r4, y) >> 32;

    MixTrace {
        x0,
        y,
        z,
        rounds: [r1, r2, r3, r4],
        t,
        last,
    }
}

/// Final mixed word for `(a, b)` under the given fold.
pub fn mix(a: u64, b: u64, fold: FinalFold) -> u64 {
    let trace = mix_trace(a, b);
    fold.apply(trace.t, trace.last)
}
