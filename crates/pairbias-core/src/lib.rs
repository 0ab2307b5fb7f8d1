//! Bias-detection harness for combined random streams.
//!
//! Runs many graph samples per combiner, tallies how often each distinct
//! graph recurs, and tests every candidate's tallies against the
//! one-draw-per-pair baseline with a chi-square test of independence.

pub mod campaign;
pub mod compare;
pub mod config;
pub mod report;
pub mod runner;
pub mod stats;
pub mod table;

pub use campaign::{run_campaign, run_combiners, CampaignError, CampaignOutcome};
pub use compare::{compare, ComparisonResult, TestOutcome};
pub use config::{ConfigError, TrialConfig, MAX_NODES};
pub use report::CampaignReport;
pub use runner::{run_trials, TrialError, TrialRun};
pub use table::FrequencyTable;
