// ABOUTME: Stateless recommendation endpoints: exercise, single-day diet, weekly meal plan
// ABOUTME: Profile JSON in, recommendation JSON out; backend failures map to error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Recommendation routes
//!
//! The exercise and diet endpoints relay whatever the configured backend
//! returns. The weekly endpoint asks the backend for each day's targets and
//! falls back to the local calculator for any day that fails.

use crate::errors::AppError;
use crate::recommender::parse_profile;
use crate::resources::ServerResources;
use crate::routes::json_body;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use fitplan_core::constants::routes;
use fitplan_intelligence::assemble_weekly_meal_plan_with_recipes;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Recommendation routes
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::EXERCISE_RECOMMEND, post(Self::handle_exercise))
            .route(routes::DIET_RECOMMEND, post(Self::handle_diet))
            .route(routes::DIET_WEEKLY, post(Self::handle_weekly))
            .with_state(resources)
    }

    /// Handle a workout plan request
    async fn handle_exercise(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let profile = json_body(body)?;
        let recommendation = resources.backend.recommend_exercise(&profile).await?;
        Ok((StatusCode::OK, Json(recommendation)).into_response())
    }

    /// Handle a single-day diet request
    async fn handle_diet(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let profile = json_body(body)?;
        let recommendation = resources.backend.recommend_diet(&profile).await?;
        Ok((StatusCode::OK, Json(recommendation)).into_response())
    }

    /// Handle a weekly meal plan request
    async fn handle_weekly(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let input = parse_profile(&json_body(body)?)?;
        let plan = assemble_weekly_meal_plan_with_recipes(
            &input,
            &resources.target_source(),
            &resources.intelligence,
            resources.recipe_catalogue(),
        )
        .await;

        info!(
            goal = %plan.goal,
            fallback_days = plan.fallback_days,
            backend = resources.backend.name(),
            "Weekly meal plan served"
        );
        Ok((StatusCode::OK, Json(plan)).into_response())
    }
}
