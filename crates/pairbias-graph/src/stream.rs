//! Per-combiner RNG seeding.
//!
//! Each combiner gets its own generator seeded from
//! `(global_seed + stream_id)`. Same seed -> same graphs, always, and no two
//! combiners in a campaign ever share a stream.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_pcg::Pcg64;

/// Generator behind plain uniform and integer draws.
pub type UniformStream = ChaCha8Rng;

/// Generator behind full-width raw words for the raw-bit combiner: PCG with a
/// 128-bit LCG state and the XSL-RR output function.
pub type RawStream = Pcg64;

/// Create a deterministic uniform stream for a given global seed and stream ID.
pub fn uniform_stream(global_seed: u64, stream_id: u64) -> UniformStream {
    ChaCha8Rng::seed_from_u64(global_seed.wrapping_add(stream_id))
}

/// Create a deterministic raw-word stream for a given global seed and stream ID.
pub fn raw_stream(global_seed: u64, stream_id: u64) -> RawStream {
    Pcg64::seed_from_u64(global_seed.wrapping_add(stream_id))
}
