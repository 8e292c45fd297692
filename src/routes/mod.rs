// ABOUTME: Route module organization for the FitPlan HTTP API
// ABOUTME: Recommendation, profile, saved plan, and health endpoints grouped by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Route module for the FitPlan server
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to the recommender backend, the planners, or the database.

/// Health check and readiness routes
pub mod health;
/// Saved exercise and diet plan routes
pub mod plans;
/// Stored profile routes and profile-derived plans
pub mod profiles;
/// Stateless recommendation routes
pub mod recommendations;

/// Health check route handlers
pub use health::HealthRoutes;
/// Saved plan route handlers
pub use plans::PlanRoutes;
/// Profile route handlers
pub use profiles::ProfileRoutes;
/// Recommendation route handlers
pub use recommendations::RecommendationRoutes;

use crate::errors::{AppError, AppResult};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use uuid::Uuid;

/// Turn a JSON extractor rejection into a structured `INVALID_INPUT` error
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

/// Parse a user ID path segment
pub(crate) fn parse_user_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_input(format!("Invalid user ID: {raw}")))
}
