use anyhow::{bail, Context, Result};
use clap::Parser;
use halocrop_core::{CropConfig, CropOutcome};
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "halocrop",
    about = "Batch portrait normalization: crop to a yellow marker, resize to a fixed square"
)]
struct Cli {
    /// Work items as INPUT=OUTPUT path pairs
    #[arg(value_name = "PAIR")]
    pairs: Vec<String>,

    /// JSON manifest: an array of {"input": ..., "output": ...} objects,
    /// appended after the positional pairs
    #[arg(short, long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// TOML crop configuration; unspecified fields keep their defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// One unit of work: read `input`, write the normalized portrait to `output`.
#[derive(Debug, Deserialize)]
struct WorkItem {
    input: PathBuf,
    output: PathBuf,
}

fn parse_pair(raw: &str) -> Result<WorkItem> {
    match raw.split_once('=') {
        Some((input, output)) if !input.is_empty() && !output.is_empty() => Ok(WorkItem {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }),
        _ => bail!("malformed pair {raw:?}, expected INPUT=OUTPUT"),
    }
}

fn load_manifest(path: &PathBuf) -> Result<Vec<WorkItem>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read manifest {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("cannot parse manifest {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CropConfig::from_toml_file(path)?,
        None => CropConfig::default(),
    };

    let mut items: Vec<WorkItem> = cli
        .pairs
        .iter()
        .map(|raw| parse_pair(raw))
        .collect::<Result<_>>()?;
    if let Some(path) = &cli.manifest {
        items.extend(load_manifest(path)?);
    }
    if items.is_empty() {
        bail!("no work items: pass INPUT=OUTPUT pairs or --manifest");
    }

    // Per-item fault isolation: one bad input never aborts the rest of the
    // batch. Failures are logged and reflected in the exit code.
    let mut markers = 0usize;
    let mut fallbacks = 0usize;
    let mut failures = 0usize;
    for item in &items {
        match halocrop_core::process(&item.input, &item.output, &config) {
            Ok(report) => match report.outcome {
                CropOutcome::Marker => markers += 1,
                CropOutcome::Fallback => fallbacks += 1,
            },
            Err(err) => {
                failures += 1;
                tracing::error!(input = %item.input.display(), error = %err, "item failed");
            }
        }
    }

    tracing::info!(
        total = items.len(),
        markers,
        fallbacks,
        failures,
        "batch complete"
    );

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
