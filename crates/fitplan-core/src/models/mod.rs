// ABOUTME: Core data models for the FitPlan service
// ABOUTME: Re-exports profile, nutrition, and saved plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Data Models
//!
//! - `ProfileInput` / `BodyProfile`: request-side profile and its resolved form
//! - `UserProfile`: the persisted profile row
//! - `TargetSummary`: rounded daily nutrition targets
//! - `ExercisePlanRecord` / `DietPlanRecord`: user-saved plans

mod nutrition;
mod plans;
mod profile;

pub use nutrition::{MealType, TargetSummary};
pub use plans::{CreateDietPlan, CreateExercisePlan, DietPlanRecord, ExercisePlanRecord};
pub use profile::{
    ActivityLevel, BodyProfile, FitnessLevel, Gender, Goal, LenientNumber, ProfileInput,
    ProfileUpdate, UserProfile,
};
