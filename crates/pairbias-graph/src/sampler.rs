//! Thresholding per-pair draws into a sampled graph.

use crate::combiner::Combine;
use crate::edge::{pair_count, upper_triangle, Edge, EdgeSet, NodeIndex};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("a graph needs at least 2 nodes, got {0}")]
    TooFewNodes(NodeIndex),

    #[error("edge probability {0} is outside [0, 1]")]
    EdgeProbability(f64),

    #[error("combiner `{combiner}` returned {got} draws for {expected} pairs")]
    DrawCount {
        combiner: String,
        expected: usize,
        got: usize,
    },
}

/// Sample one graph: a pair is an edge iff its draw is below `edge_prob`.
///
/// The combiner is called once for the whole graph so that per-node
/// strategies consume exactly `n` values per role.
pub fn sample_graph<C: Combine + ?Sized>(
    combiner: &mut C,
    nodes: NodeIndex,
    edge_prob: f64,
) -> Result<EdgeSet, SampleError> {
    if nodes < 2 {
        return Err(SampleError::TooFewNodes(nodes));
    }
    if !(0.0..=1.0).contains(&edge_prob) {
        return Err(SampleError::EdgeProbability(edge_prob));
    }

    let draws = combiner.draw_pairs(nodes);
    let expected = pair_count(nodes);
    if draws.len() != expected {
        return Err(SampleError::DrawCount {
            combiner: combiner.name().to_string(),
            expected,
            got: draws.len(),
        });
    }

    Ok(upper_triangle(nodes)
        .zip(draws)
        .filter(|(_, draw)| *draw < edge_prob)
        .map(|((p1, p2), _)| Edge::ordered(p1, p2))
        .collect())
}
