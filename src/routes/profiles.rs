// ABOUTME: Stored profile endpoints and plans derived from a stored profile
// ABOUTME: Get/put a profile, its daily targets, and its weekly meal plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Profile routes
//!
//! `PUT` replaces the whole profile (last write wins). Targets are computed
//! locally from the stored row; the weekly plan goes through the configured
//! backend like `POST /api/diet/weekly`.

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
use fitplan_core::models::{ProfileUpdate, UserProfile};
use fitplan_intelligence::{
    assemble_weekly_meal_plan_with_recipes, calculate_daily_targets, goal_insights,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profiles/:user_id",
                get(Self::handle_get_profile).put(Self::handle_put_profile),
            )
            .route("/api/profiles/:user_id/targets", get(Self::handle_targets))
            .route(
                "/api/profiles/:user_id/weekly-plan",
                get(Self::handle_weekly_plan),
            )
            .with_state(resources)
    }

    async fn load_profile(
        resources: &ServerResources,
        user_id: Uuid,
    ) -> Result<UserProfile, AppError> {
        resources
            .database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))
    }

    /// Handle get profile
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let profile = Self::load_profile(&resources, user_id).await?;
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle create-or-replace profile
    async fn handle_put_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        body: Result<Json<ProfileUpdate>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let update = json_body(body)?;
        update.validate()?;

        let profile = resources.database.upsert_profile(user_id, &update).await?;
        info!(user_id = %user_id, "Profile saved");
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle daily targets for a stored profile
    async fn handle_targets(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let profile = Self::load_profile(&resources, user_id).await?;
        let body = profile.to_input().resolve();

        let targets = calculate_daily_targets(&body, &resources.intelligence.nutrition);
        let summary = targets.summary();

        Ok((
            StatusCode::OK,
            Json(json!({
                "user_id": user_id,
                "goal": body.goal,
                "targets": summary,
                "goal_insights": goal_insights(body.goal, &summary),
            })),
        )
            .into_response())
    }

    /// Handle weekly meal plan for a stored profile
    async fn handle_weekly_plan(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user_id = parse_user_id(&user_id)?;
        let profile = Self::load_profile(&resources, user_id).await?;

        let plan = assemble_weekly_meal_plan_with_recipes(
            &profile.to_input(),
            &resources.target_source(),
            &resources.intelligence,
            resources.recipe_catalogue(),
        )
        .await;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }
}
