// ABOUTME: Saved exercise and diet plan endpoints for a user
// ABOUTME: Create returns 201 with the stored row; list returns newest first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::routes::{json_body, parse_user_id};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use fitplan_core::models::{CreateDietPlan, CreateExercisePlan};
use std::sync::Arc;

/// Saved plan routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all saved plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profiles/:user_id/exercise-plans",
                get(Self::handle_list_exercise_plans).post(Self::handle_create_exercise_plan),
            )
            .route(
                "/api/profiles/:user_id/diet-plans",
                get(Self::handle_list_diet_plans).post(Self::handle_create_diet_plan),
            )
            .with_state(resources)
    }

    async fn handle_create_exercise_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        body: Result<Json<CreateExercisePlan>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let request = json_body(body)?;
        request.validate()?;

        let record = resources
            .database
            .create_exercise_plan(user_id, &request)
            .await?;
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    async fn handle_list_exercise_plans(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let plans = resources.database.list_exercise_plans(user_id).await?;
        Ok((StatusCode::OK, Json(plans)).into_response())
    }

    async fn handle_create_diet_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        body: Result<Json<CreateDietPlan>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let request = json_body(body)?;
        request.validate()?;

        let record = resources.database.create_diet_plan(user_id, &request).await?;
        Ok((StatusCode::CREATED, Json(record)).into_response())
    }

    async fn handle_list_diet_plans(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let plans = resources.database.list_diet_plans(user_id).await?;
        Ok((StatusCode::OK, Json(plans)).into_response())
    }
}
