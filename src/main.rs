//! Tactical Grid - scenario runner
//!
//! Reads a JSON array of tool requests, runs them in order against one
//! battlefield and prints one JSON response per request on stdout. Logs go
//! to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use tactical_grid::command::{CommandExecutor, ErrorReport, Request};
use tactical_grid::core::config::{load_config, EngineConfig};
use tactical_grid::core::error::{Result, SpatialError};

/// Run spatial combat requests from a script
#[derive(Parser, Debug)]
#[command(name = "tactical-grid")]
#[command(about = "Run battlefield requests and print structured results")]
struct Args {
    /// JSON file holding an array of requests, or `-` for stdin
    #[arg(long)]
    script: String,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tracing filter, overrides RUST_LOG
    #[arg(long)]
    log_filter: Option<String>,

    /// Pretty-print each response
    #[arg(long)]
    pretty: bool,
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tactical_grid=info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_script(source: &str) -> Result<Vec<Value>> {
    let text = if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn error_value(error: &SpatialError) -> Value {
    json!({ "kind": "error", "error": ErrorReport::from(error) })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_filter.as_deref());

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => EngineConfig::default(),
    };

    let script = read_script(&args.script)?;
    tracing::info!("Running {} requests", script.len());

    let mut executor = CommandExecutor::with_config(config)?;
    let mut failures = 0;

    for entry in script {
        let output = match serde_json::from_value::<Request>(entry) {
            Ok(request) => match executor.execute(request) {
                Ok(response) => serde_json::to_value(&response)?,
                Err(e) => {
                    failures += 1;
                    error_value(&e)
                }
            },
            Err(e) => {
                failures += 1;
                let e = SpatialError::InvalidRequest(e.to_string());
                tracing::warn!("Skipping malformed request: {}", e);
                error_value(&e)
            }
        };

        if args.pretty {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", output);
        }
    }

    tracing::info!(
        "Done: {} creatures on the battlefield, {} requests rejected",
        executor.battlefield().creature_count(),
        failures
    );
    Ok(())
}
