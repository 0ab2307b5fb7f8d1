//! Strategies for deriving one draw per node pair.
//!
//! Every strategy produces, per call, one normalized draw in `[0, 1)` for
//! each unordered pair of an `n`-node graph, in [`upper_triangle`] order.
//! The per-node strategies consume exactly `n` values for the first endpoint
//! role and `n` for the second, regardless of how many pairs there are.

pub mod middle_square;
pub mod modulo;
pub mod raw_bits;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::edge::{upper_triangle, NodeIndex};
use crate::stream::{raw_stream, uniform_stream, RawStream, UniformStream};

pub use middle_square::FinalFold;

/// Capability shared by every pair-draw strategy.
pub trait Combine {
    /// Stable name used as the key in frequency and comparison tables.
    fn name(&self) -> &str;

    /// Draw one value in `[0, 1)` per unordered pair, advancing the
    /// strategy's own stream.
    fn draw_pairs(&mut self, nodes: NodeIndex) -> Vec<f64>;
}

/// The fixed set of strategies under study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinerKind {
    /// One fresh uniform per pair. The baseline.
    Independent,
    /// `(a + b) mod 1` of two per-node uniforms.
    ModuloSum,
    /// Five rounds of middle-square mixing of two per-node words.
    MiddleSquare,
    /// Multiply/subtract/xor of two per-node words from a PCG-DXSM stream.
    RawBits,
}

impl CombinerKind {
    /// All strategies, baseline first.
    pub const ALL: [CombinerKind; 4] = [
        CombinerKind::Independent,
        CombinerKind::ModuloSum,
        CombinerKind::MiddleSquare,
        CombinerKind::RawBits,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CombinerKind::Independent => "independent",
            CombinerKind::ModuloSum => "modulo_sum",
            CombinerKind::MiddleSquare => "middle_square",
            CombinerKind::RawBits => "raw_bits",
        }
    }

    /// Offset added to the global seed so each strategy owns its stream.
    pub fn stream_id(self) -> u64 {
        match self {
            CombinerKind::Independent => 0,
            CombinerKind::ModuloSum => 1,
            CombinerKind::MiddleSquare => 2,
            CombinerKind::RawBits => 3,
        }
    }
}

impl std::fmt::Display for CombinerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A strategy together with the generator state it draws from.
#[derive(Debug, Clone)]
pub enum Combiner {
    Independent(UniformStream),
    ModuloSum(UniformStream),
    MiddleSquare { rng: UniformStream, fold: FinalFold },
    /// The raw-word generator is injected so runs stay reproducible and no
    /// state is shared between parallel runners.
    RawBits(RawStream),
}

impl Combiner {
    /// Build a strategy with its stream seeded from `global_seed`.
    ///
    /// `fold` only affects [`CombinerKind::MiddleSquare`].
    pub fn new(kind: CombinerKind, global_seed: u64, fold: FinalFold) -> Self {
        let stream_id = kind.stream_id();
        match kind {
            CombinerKind::Independent => {
                Combiner::Independent(uniform_stream(global_seed, stream_id))
            }
            CombinerKind::ModuloSum => Combiner::ModuloSum(uniform_stream(global_seed, stream_id)),
            CombinerKind::MiddleSquare => Combiner::MiddleSquare {
                rng: uniform_stream(global_seed, stream_id),
                fold,
            },
            CombinerKind::RawBits => Combiner::RawBits(raw_stream(global_seed, stream_id)),
        }
    }

    pub fn kind(&self) -> CombinerKind {
        match self {
            Combiner::Independent(_) => CombinerKind::Independent,
            Combiner::ModuloSum(_) => CombinerKind::ModuloSum,
            Combiner::MiddleSquare { .. } => CombinerKind::MiddleSquare,
            Combiner::RawBits(_) => CombinerKind::RawBits,
        }
    }
}

impl Combine for Combiner {
    fn name(&self) -> &str {
        self.kind().name()
    }

    fn draw_pairs(&mut self, nodes: NodeIndex) -> Vec<f64> {
        match self {
            Combiner::Independent(rng) => upper_triangle(nodes).map(|_| rng.gen::<f64>()).collect(),
            Combiner::ModuloSum(rng) => {
                let first = uniforms(rng, nodes);
                let second = uniforms(rng, nodes);
                combine_per_node(&first, &second, nodes, modulo::modulo_sum)
            }
            Combiner::MiddleSquare { rng, fold } => {
                let first = words(rng, nodes);
                let second = words(rng, nodes);
                let fold = *fold;
                combine_per_node(&first, &second, nodes, |a, b| {
                    unit_interval(middle_square::mix(a, b, fold))
                })
            }
            Combiner::RawBits(rng) => {
                let first = words(rng, nodes);
                let second = words(rng, nodes);
                combine_per_node(&first, &second, nodes, |a, b| {
                    unit_interval(raw_bits::combine_words(a, b))
                })
            }
        }
    }
}

/// Scale of one step in the 53-bit window used by [`unit_interval`].
const UNIT_STEP: f64 = 1.0 / (1u64 << 53) as f64;

/// Map a full-width word onto `[0, 1)` using its top 53 bits.
///
/// Dividing by `u64::MAX` instead would round the largest words up to 1.0.
pub fn unit_interval(word: u64) -> f64 {
    (word >> 11) as f64 * UNIT_STEP
}

fn uniforms<R: Rng + ?Sized>(rng: &mut R, nodes: NodeIndex) -> Vec<f64> {
    (0..nodes).map(|_| rng.gen::<f64>()).collect()
}

fn words<R: RngCore + ?Sized>(rng: &mut R, nodes: NodeIndex) -> Vec<u64> {
    (0..nodes).map(|_| rng.next_u64()).collect()
}

/// Pair `(i, j)` combines the first-role value of `i` with the second-role
/// value of `j`.
fn combine_per_node<T, F>(first: &[T], second: &[T], nodes: NodeIndex, combine: F) -> Vec<f64>
where
    T: Copy,
    F: Fn(T, T) -> f64,
{
    upper_triangle(nodes)
        .map(|(i, j)| combine(first[i as usize], second[j as usize]))
        .collect()
}
