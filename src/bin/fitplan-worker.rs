// ABOUTME: Worker binary spawned by the process bridge: profile JSON in, recommendation out
// ABOUTME: Reads stdin, writes JSON to stdout, logs and reports errors on stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # FitPlan Worker
//!
//! ```bash
//! echo '{"weight": 70, "height": 175, "age": 30}' | fitplan-worker diet
//! ```
//!
//! With `--recipes` (or `RECIPE_CATALOGUE_PATH`) diet meals come from a JSON
//! recipe catalogue.
//!
//! Exit status is zero only when a recommendation was written to stdout.
//! Otherwise a `{"error": ...}` object goes to stderr and the status is 1.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fitplan_server::logging::LoggingConfig;
use fitplan_server::recommender::parse_profile;
use fitplan_intelligence::{
    recommend_diet_with_recipes, recommend_exercise, IntelligenceConfig, RecipeCatalogue,
};
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "fitplan-worker")]
#[command(about = "Compute one recommendation from a profile on stdin")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON recipe catalogue for diet meals
    #[arg(long, env = "RECIPE_CATALOGUE_PATH")]
    recipes: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Single-day diet recommendation
    Diet,
    /// Seven-day workout plan
    Exercise,
}

fn load_recipes(path: &std::path::Path) -> Result<RecipeCatalogue> {
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read recipe catalogue {}", path.display()))?;
    let catalogue = RecipeCatalogue::from_json_slice(&bytes)
        .with_context(|| format!("Invalid recipe catalogue {}", path.display()))?;
    debug!(recipes = catalogue.len(), "Loaded recipe catalogue");
    Ok(catalogue)
}

fn run(args: &Args) -> Result<Value> {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read stdin")?;
    let body: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let input = parse_profile(&body)?;

    let config = IntelligenceConfig::default();

    Ok(match args.command {
        Command::Diet => {
            let recipes = args.recipes.as_deref().map(load_recipes).transpose()?;
            serde_json::to_value(recommend_diet_with_recipes(&input, &config, recipes.as_ref()))?
        }
        Command::Exercise => serde_json::to_value(recommend_exercise(&input, &config))?,
    })
}

fn main() -> ExitCode {
    let args = Args::parse();
    // Logging is best effort: stdout must stay reserved for the response
    let _ = LoggingConfig::for_worker().init();

    match run(&args) {
        Ok(output) => {
            debug!("Recommendation computed");
            let mut stdout = io::stdout().lock();
            if serde_json::to_writer(&mut stdout, &output)
                .map_err(io::Error::from)
                .and_then(|()| stdout.flush())
                .is_err()
            {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", json!({ "error": format!("{e:#}") }));
            ExitCode::FAILURE
        }
    }
}
