//! Occurrence counts of distinct sampled graphs.

use std::collections::BTreeMap;

use pairbias_graph::{EdgeSet, GraphHash};
use serde::Serialize;

/// One distinct graph seen during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableEntry {
    pub count: u64,
    /// The first edge set recorded under this hash, kept for inspection.
    pub representative: EdgeSet,
}

/// Graph hash -> occurrence count, plus one representative graph per hash.
///
/// Owned by exactly one trial runner while it accumulates; read-only after.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    entries: BTreeMap<GraphHash, TableEntry>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `edges` and return its hash.
    pub fn record(&mut self, edges: EdgeSet) -> GraphHash {
        let hash = GraphHash::of(&edges);
        self.entries
            .entry(hash.clone())
            .or_insert_with(|| TableEntry {
                count: 0,
                representative: edges,
            })
            .count += 1;
        self.total += 1;
        hash
    }

    pub fn count(&self, hash: &GraphHash) -> u64 {
        self.entries.get(hash).map(|e| e.count).unwrap_or(0)
    }

    pub fn representative(&self, hash: &GraphHash) -> Option<&EdgeSet> {
        self.entries.get(hash).map(|e| &e.representative)
    }

    /// Sum of all counts, i.e. the number of recorded trials.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct graphs observed.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in hash order.
    pub fn iter(&self) -> impl Iterator<Item = (&GraphHash, &TableEntry)> {
        self.entries.iter()
    }

    pub fn hashes(&self) -> impl Iterator<Item = &GraphHash> {
        self.entries.keys()
    }
}
