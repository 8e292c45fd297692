// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: In-memory database, server resources, and router construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `fitplan_server`

use anyhow::Result;
use axum::Router;
use fitplan_core::models::ProfileUpdate;
use fitplan_server::{
    config::ServerConfig,
    database::Database,
    recommender::{NativeBackend, RecommendationBackend},
    resources::ServerResources,
    server::FitPlanServer,
};
use serde_json::{json, Value};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Configuration used by tests: in-memory database, native backend
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database: fitplan_server::config::DatabaseUrl::Memory,
        ..ServerConfig::default()
    }
}

/// Resources over an in-memory database and the given backend
pub async fn create_test_resources(
    backend: Arc<dyn RecommendationBackend>,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(database, backend, test_config())))
}

/// Full application router backed by the native planners
pub async fn create_test_router() -> Result<Router> {
    let config = test_config();
    let backend = Arc::new(NativeBackend::new(config.intelligence()));
    let resources = create_test_resources(backend).await?;
    Ok(FitPlanServer::new(resources).router())
}

/// Full application router over a specific backend
pub async fn create_router_with_backend(
    backend: Arc<dyn RecommendationBackend>,
) -> Result<Router> {
    Ok(FitPlanServer::new(create_test_resources(backend).await?).router())
}

/// The reference profile: 70 kg, 175 cm, 30 years, male, moderate, maintain
pub fn reference_profile() -> Value {
    json!({
        "weight": 70,
        "height": 175,
        "age": 30,
        "gender": "male",
        "activity_level": "moderate",
        "goal": "maintain"
    })
}

/// Stored-profile form of the reference profile
pub fn reference_profile_update() -> ProfileUpdate {
    serde_json::from_value(json!({
        "full_name": "Test Runner",
        "weight": 70.0,
        "height": 175.0,
        "age": 30,
        "gender": "male",
        "activity_level": "moderate",
        "goal": "maintain",
        "fitness_level": "intermediate",
        "weekly_weight_change": 0.0
    }))
    .expect("reference profile deserializes")
}
