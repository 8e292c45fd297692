// ABOUTME: Main library entry point for the FitPlan recommendation server
// ABOUTME: HTTP API, recommender backends, process bridge, and profile storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![deny(unsafe_code)]

//! # FitPlan Server
//!
//! An HTTP service that turns a body profile into daily nutrition targets,
//! meal plans, and workout plans.
//!
//! ## Architecture
//!
//! - **`fitplan-core`**: error type, constants, and data models
//! - **`fitplan-intelligence`**: metabolic calculator, meal and exercise
//!   tables, weekly plan assembler, workout planner
//! - **recommender**: where recommendations come from. In-process planners,
//!   a child process per request (the [`bridge`]), or a remote HTTP service
//! - **routes**: thin axum handlers over the recommender and the database
//! - **database**: `SQLite` storage for profiles and saved plans
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitplan_server::config::ServerConfig;
//! use fitplan_server::resources::ServerResources;
//! use fitplan_server::server::FitPlanServer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let port = config.http_port;
//!     let resources = ServerResources::from_config(config).await?;
//!     FitPlanServer::new(Arc::new(resources)).run(port).await
//! }
//! ```

/// Process bridge running one recommender child per request
pub mod bridge;

/// Environment-driven configuration
pub mod config;

/// Profile and saved plan storage
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (tracing, CORS)
pub mod middleware;

/// Recommendation backends
pub mod recommender;

/// Shared resources for route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serving
pub mod server;
