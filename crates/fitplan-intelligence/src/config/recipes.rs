// ABOUTME: Recipe catalogue selection settings: calorie windows, goal scoring, and variety
// ABOUTME: Controls how meal slots are filled from a loaded recipe catalogue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Recipe selection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSelectionConfig {
    /// First calorie window around the slot target (0.3 = ±30%)
    pub tight_tolerance: f64,
    /// Second, wider window tried when the first has too few recipes
    pub wide_tolerance: f64,
    /// Lower bound of every calorie window (kcal)
    pub min_window_kcal: f64,
    /// Most candidates considered after the day offset is applied
    pub max_slice: usize,
    /// Unused candidates below which previously used recipes become eligible again
    pub reuse_floor: usize,
    /// Most recent picks that stay excluded after a reuse reset
    pub recent_exclusion: usize,
    /// Score bonus for recipes with an image
    pub image_bonus: f64,
}

impl Default for RecipeSelectionConfig {
    fn default() -> Self {
        Self {
            tight_tolerance: 0.3,
            wide_tolerance: 0.5,
            min_window_kcal: 100.0,
            max_slice: 20,
            reuse_floor: 10,
            recent_exclusion: 5,
            image_bonus: 50.0,
        }
    }
}

impl RecipeSelectionConfig {
    /// Validate window and slice settings
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is outside `(0, 1)`, the windows are
    /// inverted, or the slice is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |t: f64| t > 0.0 && t < 1.0;
        if !in_unit(self.tight_tolerance) || !in_unit(self.wide_tolerance) {
            return Err(ConfigError::InvalidRange(
                "Recipe calorie tolerances must be between 0 and 1",
            ));
        }
        if self.tight_tolerance > self.wide_tolerance {
            return Err(ConfigError::InvalidRange(
                "Tight recipe tolerance must not exceed the wide tolerance",
            ));
        }
        if self.max_slice == 0 {
            return Err(ConfigError::InvalidRange("Recipe slice must hold at least one recipe"));
        }
        if !self.min_window_kcal.is_finite() || self.min_window_kcal < 0.0 {
            return Err(ConfigError::InvalidRange(
                "Recipe window floor must be a non-negative number",
            ));
        }
        Ok(())
    }
}
