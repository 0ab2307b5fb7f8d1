//! Wraparound addition of two per-node uniforms.

/// `(a + b) mod 1.0` for `a, b` in `[0, 1)`.
pub fn modulo_sum(a: f64, b: f64) -> f64 {
    (a + b) % 1.0
}
