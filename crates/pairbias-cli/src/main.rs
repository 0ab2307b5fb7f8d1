//! Entry point for the `pairbias` binary.
//!
//! Parses arguments, runs every combiner's trials in parallel, compares them
//! against the baseline and writes the report to stdout or `--output`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pairbias_cli::cli::{render_report, run_cli, Cli};
use pairbias_cli::logging;
use tracing::error;

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let report = run_cli(&cli).context("campaign failed")?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            render_report(&report, cli.format, &mut writer).context("failed to render report")?;
            writer.flush().context("failed to flush report")?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            render_report(&report, cli.format, &mut writer).context("failed to render report")?;
            writer.flush().context("failed to flush output")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let message = format!("{err:#}");
        error!(error = %message, "pairbias failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
