// ABOUTME: Saved exercise and diet plan rows created by users
// ABOUTME: Create requests carry validation; records mirror the stored columns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored exercise plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExercisePlanRecord {
    /// Plan identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Plan name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Session length in minutes
    pub duration_minutes: Option<u32>,
    /// Difficulty label (e.g. "beginner")
    pub difficulty: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Request body for saving an exercise plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExercisePlan {
    /// Plan name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Session length in minutes
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    /// Difficulty label
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl CreateExercisePlan {
    /// Reject blank names
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when the name is empty
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Exercise plan name is required"));
        }
        Ok(())
    }
}

/// Stored diet plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietPlanRecord {
    /// Plan identifier
    pub id: Uuid,
    /// Owner
    pub user_id: Uuid,
    /// Plan name
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Daily calories (kcal)
    pub calories: Option<i64>,
    /// Protein (g)
    pub protein: Option<i64>,
    /// Carbohydrates (g)
    pub carbs: Option<i64>,
    /// Fat (g)
    pub fat: Option<i64>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Request body for saving a diet plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDietPlan {
    /// Plan name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Daily calories (kcal)
    #[serde(default)]
    pub calories: Option<i64>,
    /// Protein (g)
    #[serde(default)]
    pub protein: Option<i64>,
    /// Carbohydrates (g)
    #[serde(default)]
    pub carbs: Option<i64>,
    /// Fat (g)
    #[serde(default)]
    pub fat: Option<i64>,
}

impl CreateDietPlan {
    /// Reject blank names and negative quantities
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for a blank name or a negative macro value
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Diet plan name is required"));
        }
        let quantities = [self.calories, self.protein, self.carbs, self.fat];
        if quantities.iter().flatten().any(|v| *v < 0) {
            return Err(AppError::out_of_range(
                "Calories and macros must not be negative",
            ));
        }
        Ok(())
    }
}
