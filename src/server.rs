// ABOUTME: HTTP server assembly: merges domain routers, adds tracing and CORS layers
// ABOUTME: Binds the listener and serves until Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # FitPlan Server
//!
//! One task per request on the Tokio runtime; all shared state lives in
//! [`ServerResources`].

use crate::middleware::{request_trace_layer, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, PlanRoutes, ProfileRoutes, RecommendationRoutes};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// FitPlan HTTP server
pub struct FitPlanServer {
    resources: Arc<ServerResources>,
}

impl FitPlanServer {
    /// Create a server over shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Complete application router with middleware
    #[must_use]
    pub fn router(&self) -> Router {
        let resources = &self.resources;
        Router::new()
            .merge(HealthRoutes::routes(Arc::clone(resources)))
            .merge(RecommendationRoutes::routes(Arc::clone(resources)))
            .merge(ProfileRoutes::routes(Arc::clone(resources)))
            .merge(PlanRoutes::routes(Arc::clone(resources)))
            .layer(request_trace_layer())
            .layer(setup_cors(&resources.config))
    }

    /// Bind `host:port` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails
    pub async fn run(self, port: u16) -> Result<()> {
        let address = format!("{}:{port}", self.resources.config.host);
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind {address}"))?;

        display_available_endpoints(&address);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        info!("Server stopped");
        Ok(())
    }
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(address: &str) {
    info!("=== Available API Endpoints ===");
    info!("Recommendations:");
    info!("   Exercise Plan:     POST http://{address}/api/exercise/recommend");
    info!("   Diet Plan:         POST http://{address}/api/diet/recommend");
    info!("   Weekly Meal Plan:  POST http://{address}/api/diet/weekly");
    info!("Profiles:");
    info!("   Profile:           GET|PUT http://{address}/api/profiles/{{user_id}}");
    info!("   Daily Targets:     GET  http://{address}/api/profiles/{{user_id}}/targets");
    info!("   Weekly Plan:       GET  http://{address}/api/profiles/{{user_id}}/weekly-plan");
    info!("   Exercise Plans:    GET|POST http://{address}/api/profiles/{{user_id}}/exercise-plans");
    info!("   Diet Plans:        GET|POST http://{address}/api/profiles/{{user_id}}/diet-plans");
    info!("Monitoring:");
    info!("   Health:            GET  http://{address}/health");
    info!("   Readiness:         GET  http://{address}/ready");
    info!("=== End of Endpoint List ===");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
