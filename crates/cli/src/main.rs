mod args;
mod config;
mod error;
mod run;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use filterql_core::{Resolver, Schema, SchemaAdapter};
use tracing_subscriber::EnvFilter;

use crate::args::Args;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let config = config::AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let raw = std::fs::read_to_string(&config.schema_path)
        .with_context(|| format!("Failed to read schema {}", config.schema_path.display()))?;
    let schema = Schema::from_json(&raw)
        .with_context(|| format!("Invalid schema {}", config.schema_path.display()))?;
    tracing::info!(
        schema = %config.schema_path.display(),
        fields = schema.fields.len(),
        functions = schema.functions.len(),
        "Loaded schema"
    );

    let resolver = Resolver::new(SchemaAdapter::new(schema));

    match run::run(&config.select, &resolver, &args.filter, args.sort()) {
        Ok(resolved) => {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}
