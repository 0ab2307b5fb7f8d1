//! Testing candidate combiners against the baseline.
//!
//! Every table is aligned to the union of graph hashes observed in any of
//! them, with absent graphs counted as zero. Each candidate then gets a
//! 2 x K chi-square test of independence against the baseline. A low p-value
//! means the candidate's graph frequencies differ from the baseline's.

use std::collections::BTreeSet;

use pairbias_graph::GraphHash;
use serde::Serialize;
use tracing::{debug, warn};

use crate::stats::chi_square_independence;
use crate::table::FrequencyTable;

/// Counts of several tables laid out over one shared set of graph hashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedCounts {
    /// Union of observed hashes, sorted.
    pub hashes: Vec<GraphHash>,
    /// One count per entry of `hashes`, per input table, in input order.
    pub columns: Vec<(String, Vec<u64>)>,
}

pub fn align(tables: &[(&str, &FrequencyTable)]) -> AlignedCounts {
    let hashes: Vec<GraphHash> = tables
        .iter()
        .flat_map(|(_, table)| table.hashes())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let columns = tables
        .iter()
        .map(|(name, table)| {
            let counts = hashes.iter().map(|hash| table.count(hash)).collect();
            (name.to_string(), counts)
        })
        .collect();

    AlignedCounts { hashes, columns }
}

/// Outcome of testing one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestOutcome {
    Tested {
        statistic: f64,
        dof: u64,
        p_value: f64,
    },
    /// The contingency table was too degenerate for the test to mean anything.
    InsufficientData { reason: String },
}

impl TestOutcome {
    pub fn p_value(&self) -> Option<f64> {
        match self {
            TestOutcome::Tested { p_value, .. } => Some(*p_value),
            TestOutcome::InsufficientData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub combiner: String,
    #[serde(flatten)]
    pub outcome: TestOutcome,
}

/// Candidate name -> test outcome, in candidate order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComparisonResult {
    comparisons: Vec<Comparison>,
}

impl ComparisonResult {
    pub fn get(&self, combiner: &str) -> Option<&TestOutcome> {
        self.comparisons
            .iter()
            .find(|c| c.combiner == combiner)
            .map(|c| &c.outcome)
    }

    pub fn p_value(&self, combiner: &str) -> Option<f64> {
        self.get(combiner).and_then(TestOutcome::p_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comparison> {
        self.comparisons.iter()
    }

    pub fn len(&self) -> usize {
        self.comparisons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }
}

/// Test every candidate table against `baseline`.
pub fn compare(baseline: &FrequencyTable, candidates: &[(&str, &FrequencyTable)]) -> ComparisonResult {
    let mut tables = Vec::with_capacity(candidates.len() + 1);
    tables.push(("baseline", baseline));
    tables.extend_from_slice(candidates);

    let aligned = align(&tables);
    let mut columns = aligned.columns.into_iter();
    let baseline_counts = match columns.next() {
        Some((_, counts)) => counts,
        None => return ComparisonResult::default(),
    };

    let comparisons = columns
        .map(|(combiner, counts)| {
            let outcome = match chi_square_independence(&[baseline_counts.clone(), counts]) {
                Ok(chi) => {
                    debug!(
                        combiner = %combiner,
                        statistic = chi.statistic,
                        dof = chi.dof,
                        p_value = chi.p_value,
                        "chi-square test"
                    );
                    TestOutcome::Tested {
                        statistic: chi.statistic,
                        dof: chi.dof,
                        p_value: chi.p_value,
                    }
                }
                Err(reason) => {
                    warn!(combiner = %combiner, %reason, "insufficient data for chi-square test");
                    TestOutcome::InsufficientData {
                        reason: reason.to_string(),
                    }
                }
            };
            Comparison { combiner, outcome }
        })
        .collect();

    ComparisonResult { comparisons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairbias_graph::EdgeSet;

    fn table(graphs: Vec<(Vec<(u32, u32)>, u64)>) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for (pairs, count) in graphs {
            let edges = EdgeSet::from_pairs(pairs).unwrap();
            for _ in 0..count {
                table.record(edges.clone());
            }
        }
        table
    }

    #[test]
    fn test_align_fills_missing_with_zero() {
        let a = table(vec![(vec![(0, 1)], 3), (vec![], 2)]);
        let b = table(vec![(vec![(0, 2)], 4), (vec![], 1)]);

        let aligned = align(&[("a", &a), ("b", &b)]);
        assert_eq!(aligned.hashes.len(), 3);
        assert!(aligned.hashes.windows(2).all(|w| w[0] < w[1]));

        let (_, a_counts) = &aligned.columns[0];
        let (_, b_counts) = &aligned.columns[1];
        assert_eq!(a_counts.iter().sum::<u64>(), 5);
        assert_eq!(b_counts.iter().sum::<u64>(), 5);
        for (i, hash) in aligned.hashes.iter().enumerate() {
            assert_eq!(a_counts[i], a.count(hash));
            assert_eq!(b_counts[i], b.count(hash));
        }
    }

    #[test]
    fn test_identical_tables_not_significant() {
        let base = table(vec![(vec![(0, 1)], 30), (vec![(1, 2)], 50), (vec![], 20)]);
        let result = compare(&base, &[("same", &base)]);
        assert_eq!(result.p_value("same"), Some(1.0));
    }

    #[test]
    fn test_disjoint_tables_significant() {
        let base = table(vec![(vec![(0, 1)], 100), (vec![(1, 2)], 100)]);
        let shifted = table(vec![(vec![(0, 2)], 100), (vec![(2, 3)], 100)]);
        let result = compare(&base, &[("shifted", &shifted)]);
        assert!(result.p_value("shifted").unwrap() < 1e-10);
    }

    #[test]
    fn test_single_shared_graph_is_insufficient() {
        let base = table(vec![(vec![], 10)]);
        let candidate = table(vec![(vec![], 25)]);
        let result = compare(&base, &[("flat", &candidate)]);
        assert!(matches!(
            result.get("flat"),
            Some(TestOutcome::InsufficientData { .. })
        ));
        assert_eq!(result.p_value("flat"), None);
    }

    #[test]
    fn test_empty_candidate_is_insufficient() {
        let base = table(vec![(vec![(0, 1)], 10), (vec![], 10)]);
        let empty = FrequencyTable::new();
        let result = compare(&base, &[("empty", &empty)]);
        assert!(matches!(
            result.get("empty"),
            Some(TestOutcome::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_graphs_seen_only_by_other_candidates_are_ignored() {
        let base = table(vec![(vec![(0, 1)], 40), (vec![], 60)]);
        let same = table(vec![(vec![(0, 1)], 40), (vec![], 60)]);
        let other = table(vec![(vec![(2, 3)], 100)]);

        let result = compare(&base, &[("same", &same), ("other", &other)]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.p_value("same"), Some(1.0));
        assert!(result.p_value("other").unwrap() < 1e-10);
    }

    #[test]
    fn test_outcome_serialization() {
        let base = table(vec![(vec![], 10)]);
        let result = compare(&base, &[("flat", &base)]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json[0]["combiner"], "flat");
        assert_eq!(json[0]["status"], "insufficient_data");
        assert!(json[0]["reason"].is_string());
    }
}
