// ABOUTME: Nutrition models shared by the planners and the HTTP layer
// ABOUTME: MealType and the rounded daily target summary exchanged between services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
}

impl MealType {
    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }

    /// Title-cased name for display strings
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily targets as reported over the wire (whole numbers, BMI to one decimal)
///
/// This is the shape both the native calculator and any remote or child-process
/// recommender return at the top level of a diet recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TargetSummary {
    /// Daily calorie target (kcal)
    pub daily_calories: i64,
    /// Protein target (g)
    pub protein: i64,
    /// Carbohydrate target (g)
    pub carbs: i64,
    /// Fat target (g)
    pub fat: i64,
    /// Fiber target (g)
    #[serde(default)]
    pub fiber: i64,
    /// Water target (ml)
    #[serde(default)]
    pub water_ml: i64,
    /// Total daily energy expenditure (kcal)
    #[serde(default)]
    pub tdee: i64,
    /// Basal metabolic rate (kcal)
    #[serde(default)]
    pub bmr: i64,
    /// Body mass index
    #[serde(default)]
    pub bmi: f64,
}
