//! Exportable payloads of a finished campaign.
//!
//! The report holds everything a downstream writer needs: per-graph counts
//! aligned across combiners, one comparison row per candidate, a
//! representative edge set per graph hash, and per-runner timings.

use std::collections::BTreeMap;
use std::io::{self, Write};

use pairbias_graph::{EdgeSet, GraphHash};
use serde::Serialize;

use crate::campaign::CampaignOutcome;
use crate::compare::{align, ComparisonResult, TestOutcome};
use crate::config::TrialConfig;
use crate::table::FrequencyTable;

/// Counts of one graph, one entry per column of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRow {
    pub hash: GraphHash,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunTiming {
    pub combiner: String,
    pub elapsed_secs: f64,
    pub distinct_graphs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignReport {
    /// Includes the middle-square final fold the run used.
    pub config: TrialConfig,
    /// Combiner names, baseline first; the order of every `counts` vector.
    pub columns: Vec<String>,
    pub frequencies: Vec<FrequencyRow>,
    pub comparisons: ComparisonResult,
    pub representatives: BTreeMap<GraphHash, EdgeSet>,
    pub timings: Vec<RunTiming>,
}

impl CampaignReport {
    pub fn from_outcome(outcome: &CampaignOutcome) -> Self {
        let tables: Vec<(&str, &FrequencyTable)> = outcome
            .runs
            .iter()
            .map(|run| (run.combiner.as_str(), &run.table))
            .collect();
        let aligned = align(&tables);

        let frequencies = aligned
            .hashes
            .iter()
            .enumerate()
            .map(|(i, hash)| FrequencyRow {
                hash: hash.clone(),
                counts: aligned.columns.iter().map(|(_, counts)| counts[i]).collect(),
            })
            .collect();

        let mut representatives = BTreeMap::new();
        for run in &outcome.runs {
            for (hash, entry) in run.table.iter() {
                representatives
                    .entry(hash.clone())
                    .or_insert_with(|| entry.representative.clone());
            }
        }

        let timings = outcome
            .runs
            .iter()
            .map(|run| RunTiming {
                combiner: run.combiner.clone(),
                elapsed_secs: run.elapsed.as_secs_f64(),
                distinct_graphs: run.table.distinct(),
            })
            .collect();

        Self {
            config: outcome.config.clone(),
            columns: aligned.columns.into_iter().map(|(name, _)| name).collect(),
            frequencies,
            comparisons: outcome.comparison.clone(),
            representatives,
            timings,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text summary: p-values, timings, then every distinct graph.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "nodes={} repetitions={} edge_prob={} seed={} final_fold={}",
            self.config.nodes,
            self.config.repetitions,
            self.config.edge_prob,
            self.config.seed,
            self.config.final_fold
        )?;

        writeln!(out, "\ncombiner\tp_value")?;
        for comparison in self.comparisons.iter() {
            match &comparison.outcome {
                TestOutcome::Tested { p_value, .. } => {
                    writeln!(out, "{}\t{:.6}", comparison.combiner, p_value)?
                }
                TestOutcome::InsufficientData { reason } => {
                    writeln!(out, "{}\tinsufficient data ({reason})", comparison.combiner)?
                }
            }
        }

        writeln!(out, "\ncombiner\tseconds\tdistinct_graphs")?;
        for timing in &self.timings {
            writeln!(
                out,
                "{}\t{:.3}\t{}",
                timing.combiner, timing.elapsed_secs, timing.distinct_graphs
            )?;
        }

        writeln!(out, "\nhash\t{}\tedges", self.columns.join("\t"))?;
        for row in &self.frequencies {
            let counts: Vec<String> = row.counts.iter().map(u64::to_string).collect();
            let edges = self
                .representatives
                .get(&row.hash)
                .map(EdgeSet::to_string)
                .unwrap_or_default();
            writeln!(out, "{}\t{}\t{}", row.hash, counts.join("\t"), edges)?;
        }
        Ok(())
    }
}
