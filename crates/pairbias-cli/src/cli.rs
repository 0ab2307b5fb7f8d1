//! Argument parsing and command execution for the `pairbias` binary.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pairbias_core::{run_campaign, CampaignError, CampaignReport, ConfigError, TrialConfig};
use pairbias_graph::FinalFold;
use thiserror::Error;
use tracing::info;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "pairbias",
    about = "Measure whether combining per-node random streams biases sampled graphs."
)]
pub struct Cli {
    /// JSON config file. Flags given on the command line override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Nodes per sampled graph.
    #[arg(long)]
    pub nodes: Option<u32>,

    /// Graphs sampled per combiner.
    #[arg(long)]
    pub repetitions: Option<u64>,

    /// Probability that a pair is an edge, strictly between 0 and 1.
    #[arg(long = "edge-prob")]
    pub edge_prob: Option<f64>,

    /// Global seed for every combiner's stream.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Final fold of the middle-square combiner.
    #[arg(long = "final-fold", value_enum)]
    pub final_fold: Option<FoldArg>,

    /// Write the report here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FoldArg {
    Xor,
    Pow,
}

impl From<FoldArg> for FinalFold {
    fn from(value: FoldArg) -> Self {
        match value {
            FoldArg::Xor => FinalFold::Xor,
            FoldArg::Pow => FinalFold::Pow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full report as pretty-printed JSON.
    Json,
    /// A tab-separated human-readable summary.
    Summary,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Campaign(#[from] CampaignError),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

/// Merge the optional config file with command-line overrides and validate.
pub fn resolve_config(cli: &Cli) -> Result<TrialConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => TrialConfig::load(path)?,
        None => TrialConfig::default(),
    };

    if let Some(nodes) = cli.nodes {
        config.nodes = nodes;
    }
    if let Some(repetitions) = cli.repetitions {
        config.repetitions = repetitions;
    }
    if let Some(edge_prob) = cli.edge_prob {
        config.edge_prob = edge_prob;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(fold) = cli.final_fold {
        config.final_fold = fold.into();
    }

    config.validate()?;
    Ok(config)
}

/// Run the full campaign described by `cli`.
pub fn run_cli(cli: &Cli) -> Result<CampaignReport, CliError> {
    let config = resolve_config(cli)?;
    info!(?config, "resolved configuration");
    let outcome = run_campaign(&config)?;
    Ok(CampaignReport::from_outcome(&outcome))
}

pub fn render_report<W: Write>(
    report: &CampaignReport,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let json = report.to_json_pretty()?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Summary => report.write_summary(out)?,
    }
    Ok(())
}
