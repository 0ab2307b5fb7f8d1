//! Repeated sampling of one combiner into a frequency table.

use std::time::{Duration, Instant};

use pairbias_graph::{sample_graph, Combine, SampleError};
use tracing::{debug, info, info_span};

use crate::config::{ConfigError, TrialConfig};
use crate::table::FrequencyTable;

/// Progress is logged this many times per run.
const PROGRESS_STEPS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("trial {trial} of `{combiner}` failed: {source}")]
    Sample {
        combiner: String,
        trial: u64,
        #[source]
        source: SampleError,
    },
}

/// Result of one complete runner.
#[derive(Debug, Clone)]
pub struct TrialRun {
    pub combiner: String,
    pub table: FrequencyTable,
    pub elapsed: Duration,
}

/// Sample `config.repetitions` graphs from `combiner` and tally them.
///
/// The first failing trial aborts the run: an incomplete tally would bias
/// the comparison, so no partial table is returned.
pub fn run_trials<C: Combine + ?Sized>(
    combiner: &mut C,
    config: &TrialConfig,
) -> Result<TrialRun, TrialError> {
    config.validate()?;

    let name = combiner.name().to_string();
    let span = info_span!("trial_run", combiner = %name, repetitions = config.repetitions);
    let _guard = span.enter();

    let started = Instant::now();
    let progress_every = (config.repetitions / PROGRESS_STEPS).max(1);
    let mut table = FrequencyTable::new();

    for trial in 0..config.repetitions {
        let edges = sample_graph(combiner, config.nodes, config.edge_prob).map_err(|source| {
            TrialError::Sample {
                combiner: name.clone(),
                trial,
                source,
            }
        })?;
        table.record(edges);

        if (trial + 1) % progress_every == 0 {
            debug!(completed = trial + 1, distinct = table.distinct(), "trial progress");
        }
    }

    let elapsed = started.elapsed();
    info!(
        distinct_graphs = table.distinct(),
        elapsed_ms = elapsed.as_millis() as u64,
        "trial run complete"
    );

    Ok(TrialRun {
        combiner: name,
        table,
        elapsed,
    })
}
