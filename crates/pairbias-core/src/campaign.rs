//! Running every combiner in parallel and comparing the results.
//!
//! One rayon task per combiner, each owning its combiner and streams. The
//! tasks are joined before the comparison runs; the first failing runner
//! fails the whole campaign and no partial comparison is produced.

use pairbias_graph::{Combine, Combiner, CombinerKind};
use rayon::prelude::*;
use tracing::{info, info_span};

use crate::compare::{compare, ComparisonResult, TestOutcome};
use crate::config::{ConfigError, TrialConfig};
use crate::runner::{run_trials, TrialError, TrialRun};
use crate::table::FrequencyTable;

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("a campaign needs at least a baseline combiner")]
    NoBaseline,

    #[error("runner `{combiner}` failed: {source}")]
    Worker {
        combiner: String,
        #[source]
        source: TrialError,
    },
}

/// Everything a campaign produced.
#[derive(Debug, Clone)]
pub struct CampaignOutcome {
    pub config: TrialConfig,
    /// Baseline first, then candidates in the order they were given.
    pub runs: Vec<TrialRun>,
    pub comparison: ComparisonResult,
}

impl CampaignOutcome {
    pub fn baseline(&self) -> Option<&TrialRun> {
        self.runs.first()
    }
}

/// The four strategies under study, each seeded from `config.seed`.
pub fn build_combiners(config: &TrialConfig) -> Vec<Combiner> {
    CombinerKind::ALL
        .iter()
        .map(|&kind| Combiner::new(kind, config.seed, config.final_fold))
        .collect()
}

/// Run the standard campaign: the baseline and the three candidates.
pub fn run_campaign(config: &TrialConfig) -> Result<CampaignOutcome, CampaignError> {
    run_combiners(build_combiners(config), config)
}

/// Run `combiners` in parallel and test each against the first one.
pub fn run_combiners<C>(combiners: Vec<C>, config: &TrialConfig) -> Result<CampaignOutcome, CampaignError>
where
    C: Combine + Send,
{
    config.validate()?;
    if combiners.is_empty() {
        return Err(CampaignError::NoBaseline);
    }

    let span = info_span!(
        "campaign",
        runners = combiners.len(),
        nodes = config.nodes,
        repetitions = config.repetitions,
        edge_prob = config.edge_prob,
        final_fold = %config.final_fold,
    );
    let _guard = span.enter();
    info!("starting campaign");

    let runs = combiners
        .into_par_iter()
        .map(|mut combiner| {
            run_trials(&mut combiner, config).map_err(|source| CampaignError::Worker {
                combiner: combiner.name().to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (baseline, candidates) = runs.split_first().ok_or(CampaignError::NoBaseline)?;
    let candidate_tables: Vec<(&str, &FrequencyTable)> = candidates
        .iter()
        .map(|run| (run.combiner.as_str(), &run.table))
        .collect();
    let comparison = compare(&baseline.table, &candidate_tables);

    for entry in comparison.iter() {
        match &entry.outcome {
            TestOutcome::Tested { p_value, .. } => {
                info!(combiner = %entry.combiner, p_value, "compared against baseline")
            }
            TestOutcome::InsufficientData { reason } => {
                info!(combiner = %entry.combiner, %reason, "not compared")
            }
        }
    }

    Ok(CampaignOutcome {
        config: config.clone(),
        runs,
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairbias_graph::FinalFold;

    #[test]
    fn test_build_combiners_baseline_first() {
        let combiners = build_combiners(&TrialConfig::default());
        let kinds: Vec<CombinerKind> = combiners.iter().map(Combiner::kind).collect();
        assert_eq!(kinds, CombinerKind::ALL.to_vec());
    }

    #[test]
    fn test_build_combiners_carries_fold() {
        let config = TrialConfig {
            final_fold: FinalFold::Pow,
            ..TrialConfig::default()
        };
        let combiners = build_combiners(&config);
        assert!(combiners
            .iter()
            .any(|c| matches!(c, Combiner::MiddleSquare { fold: FinalFold::Pow, .. })));
    }

    #[test]
    fn test_no_combiners_rejected() {
        let result = run_combiners(Vec::<Combiner>::new(), &TrialConfig::default());
        assert!(matches!(result, Err(CampaignError::NoBaseline)));
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let config = TrialConfig {
            edge_prob: 0.0,
            ..TrialConfig::default()
        };
        assert!(matches!(
            run_campaign(&config),
            Err(CampaignError::Config(ConfigError::EdgeProbability(_)))
        ));
    }
}
