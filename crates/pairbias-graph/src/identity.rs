//! Content hash identifying a sampled graph.
//!
//! The canonical edge list is serialized as little-endian `(p1, p2)` words,
//! digested with SHA-1 and truncated to [`HASH_HEX_LEN`] hex characters
//! (48 bits). At six nodes there are at most 2^15 distinct graphs, so the
//! chance that any two of them collide is about 2^30 / 2^49, under 2e-6.
//! Larger graphs outgrow this bound once runs produce millions of distinct
//! graphs, so run configurations stop at six nodes.

use serde::Serialize;
use sha1::{Digest, Sha1};

use crate::edge::EdgeSet;

/// Length of a [`GraphHash`] in hex characters.
pub const HASH_HEX_LEN: usize = 12;

/// Short hex identifier of a canonical edge set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GraphHash(String);

impl GraphHash {
    /// Hash a graph. Insertion order never matters because [`EdgeSet`] is
    /// already sorted and deduplicated.
    pub fn of(edges: &EdgeSet) -> Self {
        let mut hasher = Sha1::new();
        for edge in edges.edges() {
            hasher.update(edge.p1().to_le_bytes());
            hasher.update(edge.p2().to_le_bytes());
        }
        let digest = hasher.finalize();

        let hex: String = digest
            .iter()
            .take(HASH_HEX_LEN / 2)
            .map(|byte| format!("{byte:02x}"))
            .collect();
        GraphHash(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GraphHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
