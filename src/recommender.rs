// ABOUTME: Recommendation backends: in-process planners, child process bridge, remote HTTP
// ABOUTME: One trait behind the diet and exercise endpoints plus a weekly-plan target adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Recommendation Backends
//!
//! Handlers talk to a [`RecommendationBackend`] and relay whatever JSON it
//! produces. Three implementations exist:
//!
//! - [`NativeBackend`] runs the planners in-process
//! - [`ProcessBackend`] spawns a worker per request through the [`ProcessBridge`]
//! - [`HttpBackend`] forwards to another recommender service
//!
//! [`BackendTargetSource`] adapts any backend into the per-day target source
//! used by weekly plan assembly.

use crate::bridge::ProcessBridge;
use crate::config::{BackendKind, BridgeConfig, CommandSpec, ServerConfig};
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use fitplan_core::constants::routes;
use fitplan_core::models::{ProfileInput, TargetSummary};
use fitplan_intelligence::weekly_plan::DailyTargetSource;
use fitplan_intelligence::{
    recommend_diet_with_recipes, recommend_exercise, IntelligenceConfig, RecipeCatalogue,
};
use reqwest::{Client, ClientBuilder};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Connect timeout for the remote recommender
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Produces diet and exercise recommendations as JSON
#[async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Short backend name for logs and readiness output
    fn name(&self) -> &'static str;

    /// Single-day diet recommendation for a profile body
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot produce a recommendation
    async fn recommend_diet(&self, profile: &Value) -> AppResult<Value>;

    /// Seven-day workout plan for a profile body
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot produce a recommendation
    async fn recommend_exercise(&self, profile: &Value) -> AppResult<Value>;
}

/// Parse a request body into lenient profile input
///
/// # Errors
///
/// Returns `INVALID_INPUT` if the body is not a JSON object
pub fn parse_profile(profile: &Value) -> AppResult<ProfileInput> {
    if !profile.is_object() {
        return Err(AppError::invalid_input("Request body must be a JSON object"));
    }
    serde_json::from_value(profile.clone())
        .map_err(|e| AppError::invalid_input(format!("Invalid profile: {e}")))
}

/// In-process planners
#[derive(Debug, Clone, Default)]
pub struct NativeBackend {
    config: IntelligenceConfig,
    recipes: Option<Arc<RecipeCatalogue>>,
}

impl NativeBackend {
    /// Create a backend using the given planner settings
    #[must_use]
    pub const fn new(config: IntelligenceConfig) -> Self {
        Self {
            config,
            recipes: None,
        }
    }

    /// Fill diet meal slots from a recipe catalogue
    #[must_use]
    pub fn with_recipes(mut self, recipes: Arc<RecipeCatalogue>) -> Self {
        self.recipes = Some(recipes);
        self
    }
}

#[async_trait]
impl RecommendationBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn recommend_diet(&self, profile: &Value) -> AppResult<Value> {
        let input = parse_profile(profile)?;
        Ok(serde_json::to_value(recommend_diet_with_recipes(
            &input,
            &self.config,
            self.recipes.as_deref(),
        ))?)
    }

    async fn recommend_exercise(&self, profile: &Value) -> AppResult<Value> {
        let input = parse_profile(profile)?;
        Ok(serde_json::to_value(recommend_exercise(&input, &self.config))?)
    }
}

/// Child process per request
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    bridge: ProcessBridge,
    diet_command: CommandSpec,
    exercise_command: CommandSpec,
}

impl ProcessBackend {
    /// Create a backend from bridge settings
    #[must_use]
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            bridge: ProcessBridge::new(config.max_concurrent),
            diet_command: config.diet_command.clone(),
            exercise_command: config.exercise_command.clone(),
        }
    }
}

#[async_trait]
impl RecommendationBackend for ProcessBackend {
    fn name(&self) -> &'static str {
        "process"
    }

    async fn recommend_diet(&self, profile: &Value) -> AppResult<Value> {
        self.bridge.run(&self.diet_command, profile).await
    }

    async fn recommend_exercise(&self, profile: &Value) -> AppResult<Value> {
        self.bridge.run(&self.exercise_command, profile).await
    }
}

/// Remote recommender reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend for `base_url` with a whole-request timeout
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs.max(1))))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    async fn post(&self, route: &str, profile: &Value) -> AppResult<Value> {
        let url = format!("{}{route}", self.base_url);
        debug!(url = %url, "Forwarding recommendation request");

        let response = self
            .client
            .post(&url)
            .json(profile)
            .send()
            .await
            .map_err(|e| {
                let reason = if e.is_timeout() { "timeout" } else { "unreachable" };
                AppError::external_unavailable("Recommender", e.to_string())
                    .with_details(json!({ "url": url, "reason": reason }))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            AppError::external_service("Recommender", e.to_string())
                .with_details(json!({ "url": url, "status": status.as_u16() }))
        })?;

        if !status.is_success() {
            let details = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
            return Err(AppError::external_service(
                "Recommender",
                format!("{route} returned {status}"),
            )
            .with_details(json!({ "url": url, "status": status.as_u16(), "body": details })));
        }

        serde_json::from_str(&body).map_err(|e| {
            AppError::external_service("Recommender", format!("{route} returned invalid JSON: {e}"))
                .with_details(json!({
                    "url": url,
                    "status": status.as_u16(),
                    "parse_error": e.to_string(),
                }))
        })
    }
}

#[async_trait]
impl RecommendationBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn recommend_diet(&self, profile: &Value) -> AppResult<Value> {
        self.post(routes::DIET_RECOMMEND, profile).await
    }

    async fn recommend_exercise(&self, profile: &Value) -> AppResult<Value> {
        self.post(routes::EXERCISE_RECOMMEND, profile).await
    }
}

/// Build the backend selected by configuration
///
/// Only the native backend uses `recipes`; worker processes load the catalogue
/// themselves from the inherited `RECIPE_CATALOGUE_PATH`.
///
/// # Errors
///
/// Returns a configuration error if the http backend has no URL
pub fn build_backend(
    config: &ServerConfig,
    recipes: Option<Arc<RecipeCatalogue>>,
) -> AppResult<Arc<dyn RecommendationBackend>> {
    Ok(match config.backend {
        BackendKind::Native => {
            let backend = NativeBackend::new(config.intelligence());
            Arc::new(match recipes {
                Some(recipes) => backend.with_recipes(recipes),
                None => backend,
            })
        }
        BackendKind::Process => Arc::new(ProcessBackend::new(&config.bridge)),
        BackendKind::Http => {
            let base_url = config
                .http_backend
                .base_url
                .clone()
                .ok_or_else(|| AppError::config("RECOMMENDER_URL is required for the http backend"))?;
            Arc::new(HttpBackend::new(base_url, config.http_backend.timeout_secs))
        }
    })
}

/// Weekly-plan target source that asks a backend for each day's targets
#[derive(Clone)]
pub struct BackendTargetSource {
    backend: Arc<dyn RecommendationBackend>,
}

impl BackendTargetSource {
    /// Wrap a backend
    #[must_use]
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl DailyTargetSource for BackendTargetSource {
    async fn daily_targets(&self, input: &ProfileInput) -> AppResult<TargetSummary> {
        let body = serde_json::to_value(input)?;
        let response = self.backend.recommend_diet(&body).await?;
        serde_json::from_value(response).map_err(|e| {
            AppError::invalid_process_output(format!(
                "{} backend response has no daily targets: {e}",
                self.backend.name()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_native_backend_relays_targets() {
        let backend = NativeBackend::default();
        let body = backend
            .recommend_diet(&json!({"weight": 70, "height": 175, "age": 30}))
            .await
            .unwrap();
        assert_eq!(body["daily_calories"], 2556);
        assert_eq!(body["protein"], 140);
    }

    #[tokio::test]
    async fn test_native_backend_rejects_non_object() {
        let err = NativeBackend::default()
            .recommend_exercise(&json!([1, 2, 3]))
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[tokio::test]
    async fn test_target_source_reads_summary() {
        let source = BackendTargetSource::new(Arc::new(NativeBackend::default()));
        let targets = source
            .daily_targets(&ProfileInput::default().with_day_seed(3))
            .await
            .unwrap();
        assert!(targets.daily_calories > 0);
    }

    #[test]
    fn test_build_native_backend() {
        let backend = build_backend(&ServerConfig::default(), None).unwrap();
        assert_eq!(backend.name(), "native");
    }

    #[tokio::test]
    async fn test_native_backend_uses_recipe_catalogue() {
        let catalogue = RecipeCatalogue::from_json_slice(
            json!([{"id": "stew", "name": "Lentil Stew", "calories": 700, "protein": 35,
                    "carbs": 90, "fat": 15}])
            .to_string()
            .as_bytes(),
        )
        .unwrap();
        let backend = NativeBackend::default().with_recipes(Arc::new(catalogue));

        let body = backend.recommend_diet(&json!({})).await.unwrap();

        let meals = body["meals"].as_array().unwrap();
        assert_eq!(meals.len(), 3);
        assert!(meals.iter().all(|m| m["recipe_id"] == "stew"));
        assert_eq!(body["daily_calories"], 2556);
    }
}
