// ABOUTME: Nutrition and workout planning algorithms for the FitPlan service
// ABOUTME: Metabolic calculator, meal tables and recipe catalogue, weekly and workout planners
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![deny(unsafe_code)]

//! # `FitPlan` Intelligence
//!
//! Pure planning logic with no I/O. The only async seam is
//! [`weekly_plan::DailyTargetSource`], which lets the server plug a remote or
//! child-process recommender into weekly plan assembly.

/// Planner settings and validation
pub mod config;
/// Single-day meal planning
pub mod meal_planner;
/// BMI, BMR, TDEE, and daily targets
pub mod metabolic;
/// Recipe catalogue and recipe selection
pub mod recipes;
/// Static meal and exercise tables
pub mod tables;
/// Weekly meal plan assembly
pub mod weekly_plan;
/// Seven-day workout plans
pub mod workout_plan;

pub use config::IntelligenceConfig;
pub use meal_planner::{
    recommend_diet, recommend_diet_with_recipes, DietRecommendation, MealAnalytics,
    MealRecommendation,
};
pub use metabolic::{calculate_daily_targets, goal_insights, DailyTargets, GoalInsights};
pub use recipes::{CatalogueError, Recipe, RecipeCatalogue, RecipeHistory};
pub use weekly_plan::{
    assemble_weekly_meal_plan, assemble_weekly_meal_plan_with_recipes, DailyTargetSource, DayMealPlan, DaySource, LocalTargetSource,
    WeeklyMealPlan,
};
pub use workout_plan::{recommend_exercise, WorkoutRecommendation};
