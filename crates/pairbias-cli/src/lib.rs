//! Support library for the `pairbias` binary.
//!
//! Exposes argument parsing and logging setup so tests can drive a campaign
//! without spawning a process.

pub mod cli;
pub mod logging;
