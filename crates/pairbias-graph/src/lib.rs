//! Random-graph sampling from combined per-node random streams.
//!
//! Leaves of the bias harness: the combiner family that turns per-node draws
//! into per-pair draws, the sampler that thresholds them into an edge set,
//! and the content hash that identifies a sampled graph across trials.

pub mod combiner;
pub mod edge;
pub mod identity;
pub mod sampler;
pub mod stream;

pub use combiner::{Combine, Combiner, CombinerKind, FinalFold};
pub use edge::{Edge, EdgeSet, GraphError, NodeIndex};
pub use identity::GraphHash;
pub use sampler::{sample_graph, SampleError};
