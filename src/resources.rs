// ABOUTME: Shared resource container handed to every route handler
// ABOUTME: Holds the database, recommender backend, recipe catalogue, and configuration behind Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Server Resources
//!
//! Built once at startup and shared by reference count; nothing here is
//! mutated after construction, so handlers take no locks.

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::recommender::{build_backend, BackendTargetSource, RecommendationBackend};
use fitplan_intelligence::{IntelligenceConfig, RecipeCatalogue};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Profile and plan storage
    pub database: Arc<Database>,
    /// Diet and exercise recommender
    pub backend: Arc<dyn RecommendationBackend>,
    /// Planner settings
    pub intelligence: Arc<IntelligenceConfig>,
    /// Recipe catalogue for meal slots, if one is configured
    pub recipes: Option<Arc<RecipeCatalogue>>,
    /// Server settings
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already-built parts
    #[must_use]
    pub fn new(
        database: Database,
        backend: Arc<dyn RecommendationBackend>,
        config: ServerConfig,
    ) -> Self {
        Self {
            database: Arc::new(database),
            backend,
            intelligence: Arc::new(config.intelligence()),
            recipes: None,
            config: Arc::new(config),
        }
    }

    /// Attach a recipe catalogue for weekly plans
    #[must_use]
    pub fn with_recipes(mut self, recipes: Arc<RecipeCatalogue>) -> Self {
        self.recipes = Some(recipes);
        self
    }

    /// Connect the database and build the configured backend
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, the recipe catalogue
    /// cannot be loaded, or the backend is misconfigured
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database.to_connection_string()).await?;
        let recipes = match &config.recipe_catalogue {
            Some(path) => Some(Arc::new(load_recipe_catalogue(path).await?)),
            None => None,
        };
        let backend = build_backend(&config, recipes.clone())?;
        let resources = Self::new(database, backend, config);
        Ok(match recipes {
            Some(recipes) => resources.with_recipes(recipes),
            None => resources,
        })
    }

    /// Recipe catalogue as a borrowed option for the planners
    #[must_use]
    pub fn recipe_catalogue(&self) -> Option<&RecipeCatalogue> {
        self.recipes.as_deref()
    }

    /// Per-day target source for weekly plans, backed by the configured recommender
    #[must_use]
    pub fn target_source(&self) -> BackendTargetSource {
        BackendTargetSource::new(Arc::clone(&self.backend))
    }
}

/// Read and clean a JSON recipe catalogue
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or holds no usable recipes
pub async fn load_recipe_catalogue(path: &Path) -> AppResult<RecipeCatalogue> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::config(format!("Cannot read recipe catalogue {}: {e}", path.display()))
    })?;
    let catalogue = RecipeCatalogue::from_json_slice(&bytes).map_err(|e| {
        AppError::config(format!("Recipe catalogue {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), recipes = catalogue.len(), "Loaded recipe catalogue");
    Ok(catalogue)
}
