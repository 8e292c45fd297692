// ABOUTME: Configuration module for fitplan-intelligence crate
// ABOUTME: Groups nutrition, meal plan, and workout settings under IntelligenceConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Planner configuration
//!
//! Defaults reproduce the published formulas and lookup ratios. Overrides are
//! checked with [`IntelligenceConfig::validate`] before use.

/// Configuration error types
pub mod error;
/// Workout planning settings
pub mod exercise;
/// Metabolic calculator settings
pub mod nutrition;
/// Meal planning settings
pub mod plan;
/// Recipe catalogue selection settings
pub mod recipes;

pub use error::ConfigError;
pub use exercise::{CategoryDistribution, ExerciseConfig, Intensity, IntensityParams};
pub use nutrition::NutritionConfig;
pub use plan::{GoalBand, MacroShare, MainMeals, PlanConfig};
pub use recipes::RecipeSelectionConfig;

use serde::{Deserialize, Serialize};

/// All planner settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntelligenceConfig {
    /// Metabolic calculator settings
    pub nutrition: NutritionConfig,
    /// Meal planning settings
    pub plan: PlanConfig,
    /// Workout planning settings
    pub exercise: ExerciseConfig,
    /// Recipe catalogue selection settings
    #[serde(default)]
    pub recipes: RecipeSelectionConfig,
}

impl IntelligenceConfig {
    /// Default settings with a different snack threshold
    #[must_use]
    pub fn with_snack_threshold(mut self, threshold: f64) -> Self {
        self.plan.snack_calorie_threshold = threshold;
        self
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first validation error found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nutrition.validate()?;
        self.plan.validate()?;
        self.exercise.validate()?;
        self.recipes.validate()
    }
}
