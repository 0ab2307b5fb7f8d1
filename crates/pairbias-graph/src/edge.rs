//! Undirected edges and canonical edge sets.

use serde::Serialize;

/// Index of a node in a graph of `n` nodes, always in `0..n`.
pub type NodeIndex = u32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("self-loop at node {0} is not an edge")]
    SelfLoop(NodeIndex),
}

/// An unordered node pair stored with `p1 < p2`.
///
/// The derived ordering is lexicographic on `(p1, p2)`, which is the
/// canonical order used for graph identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    p1: NodeIndex,
    p2: NodeIndex,
}

impl Edge {
    /// Build an edge from two endpoints given in either order.
    pub fn new(a: NodeIndex, b: NodeIndex) -> Result<Self, GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        Ok(Self::ordered(a.min(b), a.max(b)))
    }

    /// Caller guarantees `p1 < p2`.
    pub(crate) fn ordered(p1: NodeIndex, p2: NodeIndex) -> Self {
        debug_assert!(p1 < p2);
        Self { p1, p2 }
    }

    pub fn p1(&self) -> NodeIndex {
        self.p1
    }

    pub fn p2(&self) -> NodeIndex {
        self.p2
    }
}

/// A sampled graph: sorted, deduplicated edges.
///
/// Two edge sets built from the same pairs in any order compare equal and
/// serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct EdgeSet {
    edges: Vec<Edge>,
}

impl EdgeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Canonicalize raw `(a, b)` pairs. Rejects self-loops.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex)>,
    {
        pairs
            .into_iter()
            .map(|(a, b)| Edge::new(a, b))
            .collect::<Result<EdgeSet, _>>()
    }

    /// Every pair of an `n`-node graph.
    pub fn complete(nodes: NodeIndex) -> Self {
        upper_triangle(nodes)
            .map(|(p1, p2)| Edge::ordered(p1, p2))
            .collect()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.binary_search(edge).is_ok()
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let mut edges: Vec<Edge> = iter.into_iter().collect();
        edges.sort_unstable();
        edges.dedup();
        Self { edges }
    }
}

impl std::fmt::Display for EdgeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.edges.is_empty() {
            return write!(f, "(no edges)");
        }
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}-{}", edge.p1, edge.p2)?;
        }
        Ok(())
    }
}

/// Number of unordered pairs in an `n`-node graph.
pub fn pair_count(nodes: NodeIndex) -> usize {
    let n = nodes as usize;
    n * n.saturating_sub(1) / 2
}

/// Unordered pairs `(i, j)` with `i < j`, row by row:
/// `(0,1), (0,2), ..., (0,n-1), (1,2), ...`.
pub fn upper_triangle(nodes: NodeIndex) -> impl Iterator<Item = (NodeIndex, NodeIndex)> {
    (0..nodes).flat_map(move |i| (i + 1..nodes).map(move |j| (i, j)))
}
