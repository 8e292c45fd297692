// ABOUTME: Static lookup tables for meal and exercise plans
// ABOUTME: Re-exports meal text tables and the exercise catalogue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// Exercise catalogue by category
pub mod exercises;
/// Meal names, ingredients, instructions, timing, and portion labels
pub mod meals;

pub use exercises::ExerciseCategory;
pub use meals::{
    meal_ingredients, meal_instructions, meal_name, meal_names, meal_timing, portion_guidance,
};
