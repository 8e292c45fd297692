// ABOUTME: FitPlan HTTP server binary
// ABOUTME: Loads environment configuration, opens the database, and serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # FitPlan API Server Binary
//!
//! Starts the recommendation API with the backend selected by
//! `RECOMMENDER_BACKEND`.

use anyhow::Result;
use clap::Parser;
use fitplan_server::{
    config::ServerConfig, logging, resources::ServerResources, server::FitPlanServer,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitplan-server")]
#[command(about = "FitPlan - diet and exercise recommendation API")]
struct Args {
    /// Override HTTP port (defaults to PORT or 3000)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    logging::init_from_env()?;
    info!("Starting FitPlan API");
    info!("{}", config.summary());

    let port = config.http_port;
    let resources = ServerResources::from_config(config).await?;
    info!(
        backend = resources.backend.name(),
        "Database and recommender ready"
    );

    if let Err(e) = FitPlanServer::new(Arc::new(resources)).run(port).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
