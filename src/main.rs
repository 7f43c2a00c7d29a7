//! Chassis function runner.
//!
//! Reads a function-input JSON document from a file or stdin, runs the
//! requested evaluation path, and writes the resulting operations JSON to
//! stdout. Mirrors how the hosting checkout pipeline invokes the engine:
//! one document in, one result out, per call.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use chassis::engine::{Engine, EngineError};
use chassis::scope::DEFAULT_BUNDLE_MARKER;

/// Which evaluation path to run.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetPath {
    /// Order-line discounts.
    Order,

    /// Delivery-cost discounts.
    Delivery,
}

/// Evaluate discount rules against a cart snapshot.
#[derive(Debug, Parser)]
#[command(name = "chassis", version)]
struct Cli {
    /// Evaluation path to run.
    #[arg(long, value_enum)]
    target: TargetPath,

    /// Bundle marker tag identifying in-scope cart lines.
    #[arg(long, default_value = DEFAULT_BUNDLE_MARKER)]
    bundle_marker: String,

    /// Path to the function-input JSON document; reads stdin when omitted.
    input: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("failed to decode function input: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();

    let document = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let input = serde_json::from_str(&document)?;

    let engine = Engine::with_marker(cli.bundle_marker.as_str());
    let result = match cli.target {
        TargetPath::Order => serde_json::to_string(&engine.evaluate_order(&input))?,
        TargetPath::Delivery => serde_json::to_string(&engine.evaluate_delivery(&input)?)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{result}")?;

    Ok(())
}
