//! Run configuration: graph size, repetitions, edge probability, seed.
use std::path::{Path, PathBuf};

use pairbias_graph::{FinalFold, NodeIndex};
use serde::{Deserialize, Serialize};

/// Largest supported graph. Every pair is drawn explicitly, and graph hashes
/// are only collision-free with high probability up to this size.
pub const MAX_NODES: NodeIndex = 6;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("node count must be at least 2, got {0}")]
    TooFewNodes(NodeIndex),

    #[error("node count must be at most {MAX_NODES}, got {0}")]
    TooManyNodes(NodeIndex),

    #[error("repetitions must be positive")]
    ZeroRepetitions,

    #[error("edge probability must lie strictly between 0 and 1, got {0}")]
    EdgeProbability(f64),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only settings shared by every trial runner in a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Nodes per sampled graph.
    pub nodes: NodeIndex,
    /// Graphs sampled per combiner.
    pub repetitions: u64,
    /// A pair is an edge iff its draw is below this.
    pub edge_prob: f64,
    /// Global seed; each combiner offsets it by its stream ID.
    pub seed: u64,
    /// Final fold used by the middle-square combiner.
    pub final_fold: FinalFold,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            nodes: 4,
            repetitions: 100_000,
            edge_prob: 0.5,
            seed: 0,
            final_fold: FinalFold::Xor,
        }
    }
}

impl TrialConfig {
    /// Reject settings that would make a run meaningless, before any sampling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes < 2 {
            return Err(ConfigError::TooFewNodes(self.nodes));
        }
        if self.nodes > MAX_NODES {
            return Err(ConfigError::TooManyNodes(self.nodes));
        }
        if self.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions);
        }
        if !(self.edge_prob > 0.0 && self.edge_prob < 1.0) {
            return Err(ConfigError::EdgeProbability(self.edge_prob));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TrialConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
