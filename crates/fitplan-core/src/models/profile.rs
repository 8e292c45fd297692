// ABOUTME: Profile models for body metrics, activity level, goal, and fitness level
// ABOUTME: Lenient request parsing that silently substitutes defaults for unusable fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use crate::constants::profile_defaults;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Gender used by the BMR formula and calorie floors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male (+5 kcal BMR constant)
    #[default]
    Male,
    /// Female (-161 kcal BMR constant)
    Female,
}

impl Gender {
    /// Parse gender, treating anything but "female" as male
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Male
        }
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[serde(alias = "lightly_active")]
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    #[serde(alias = "moderately_active")]
    Moderate,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Physical job or twice-daily training
    ExtraActive,
}

impl ActivityLevel {
    /// Parse an activity level; spaces count as underscores and unknown values are moderate
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "sedentary" => Self::Sedentary,
            "light" | "lightly_active" => Self::Light,
            "very_active" => Self::VeryActive,
            "extra_active" => Self::ExtraActive,
            _ => Self::Moderate,
        }
    }

    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::VeryActive => "very_active",
            Self::ExtraActive => "extra_active",
        }
    }

    /// Whether the level earns the extra hydration allowance
    #[must_use]
    pub const fn is_highly_active(self) -> bool {
        matches!(self, Self::VeryActive | Self::ExtraActive)
    }
}

/// Body composition goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Keep current weight
    #[default]
    Maintain,
    /// Lose weight (caloric deficit)
    WeightLoss,
    /// Gain weight (caloric surplus)
    WeightGain,
    /// Gain muscle (caloric surplus, high protein)
    MuscleGain,
    /// Endurance training; nutrition treated like maintenance
    Endurance,
}

impl Goal {
    /// Parse a goal, falling back to maintain
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "weight_loss" => Self::WeightLoss,
            "weight_gain" => Self::WeightGain,
            "muscle_gain" => Self::MuscleGain,
            "endurance" => Self::Endurance,
            _ => Self::Maintain,
        }
    }

    /// Canonical snake_case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maintain => "maintain",
            Self::WeightLoss => "weight_loss",
            Self::WeightGain => "weight_gain",
            Self::MuscleGain => "muscle_gain",
            Self::Endurance => "endurance",
        }
    }

    /// Goals that plan a caloric surplus
    #[must_use]
    pub const fn is_gain_oriented(self) -> bool {
        matches!(self, Self::WeightGain | Self::MuscleGain)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    /// New to training
    #[default]
    Beginner,
    /// Trains regularly
    Intermediate,
    /// Trains hard and consistently
    Advanced,
}

impl FitnessLevel {
    /// Parse a fitness level; `None` for unrecognized values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// A JSON value expected to be numeric but accepted in any shape
///
/// Web forms submit numbers as strings, so `"72.5"` and `72.5` are equivalent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LenientNumber {
    /// A JSON number
    Number(f64),
    /// A string that may hold a number
    Text(String),
    /// Anything else; never yields a number
    Other(serde_json::Value),
}

impl LenientNumber {
    /// Finite numeric value, if one can be read
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Other(_) => None,
        };
        value.filter(|v| v.is_finite())
    }
}

impl From<f64> for LenientNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Profile fields as submitted by a client; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileInput {
    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<LenientNumber>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<LenientNumber>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<LenientNumber>,
    /// "male" or "female"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Activity level name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    /// Goal name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Fitness level name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    /// Weekly weight change target in kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_weight_change: Option<LenientNumber>,
    /// Meals per day for a single-day diet recommendation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_count: Option<LenientNumber>,
    /// Day index used to vary table lookups and random draws
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_seed: Option<LenientNumber>,
}

impl ProfileInput {
    /// Resolve into a complete profile, substituting defaults for unusable fields
    ///
    /// Weight, height, and age beyond what a human body can have are unusable;
    /// the weekly change target is clamped to the stored-profile cap.
    #[must_use]
    pub fn resolve(&self) -> BodyProfile {
        let positive = |field: &Option<LenientNumber>| {
            field
                .as_ref()
                .and_then(LenientNumber::as_f64)
                .filter(|v| *v > 0.0)
        };

        let age = positive(&self.age)
            .filter(|v| *v <= f64::from(profile_defaults::MAX_AGE_YEARS))
            .map_or(profile_defaults::AGE_YEARS, |v| v.trunc() as u32);

        let max_change = profile_defaults::MAX_WEEKLY_WEIGHT_CHANGE_KG;

        BodyProfile {
            weight_kg: positive(&self.weight)
                .filter(|v| *v <= profile_defaults::MAX_WEIGHT_KG)
                .unwrap_or(profile_defaults::WEIGHT_KG),
            height_cm: positive(&self.height)
                .filter(|v| *v <= profile_defaults::MAX_HEIGHT_CM)
                .unwrap_or(profile_defaults::HEIGHT_CM),
            age: age.max(1),
            gender: self
                .gender
                .as_deref()
                .map_or_else(Gender::default, Gender::from_str_lossy),
            activity_level: self
                .activity_level
                .as_deref()
                .map_or_else(ActivityLevel::default, ActivityLevel::from_str_lossy),
            goal: self
                .goal
                .as_deref()
                .map_or_else(Goal::default, Goal::from_str_lossy),
            fitness_level: self.fitness_level.as_deref().and_then(FitnessLevel::parse),
            weekly_weight_change_kg: self
                .weekly_weight_change
                .as_ref()
                .and_then(LenientNumber::as_f64)
                .map_or(profile_defaults::WEEKLY_WEIGHT_CHANGE_KG, |v| {
                    v.clamp(-max_change, max_change)
                }),
        }
    }

    /// Requested meal count, clamped to 3..=5
    #[must_use]
    pub fn meal_count(&self) -> u8 {
        self.meal_count
            .as_ref()
            .and_then(LenientNumber::as_f64)
            .map_or(profile_defaults::MEAL_COUNT, |v| v.clamp(3.0, 5.0) as u8)
    }

    /// Requested day seed; negative or missing seeds become zero
    #[must_use]
    pub fn day_seed(&self) -> u64 {
        self.day_seed
            .as_ref()
            .and_then(LenientNumber::as_f64)
            .filter(|v| *v >= 0.0)
            .map_or(0, |v| v.trunc() as u64)
    }

    /// Copy of this input carrying a different day seed
    #[must_use]
    pub fn with_day_seed(&self, day_seed: u64) -> Self {
        Self {
            day_seed: Some(LenientNumber::Number(day_seed as f64)),
            ..self.clone()
        }
    }
}

/// Fully resolved profile consumed by the calculators
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BodyProfile {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Goal
    pub goal: Goal,
    /// Fitness level, when reported
    pub fitness_level: Option<FitnessLevel>,
    /// Weekly weight change target in kg (0 = use goal defaults)
    pub weekly_weight_change_kg: f64,
}

impl Default for BodyProfile {
    fn default() -> Self {
        ProfileInput::default().resolve()
    }
}

/// Persisted user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Owner of the profile
    pub user_id: Uuid,
    /// Display name
    pub full_name: Option<String>,
    /// Body weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Age in years
    pub age: Option<u32>,
    /// Gender
    pub gender: Option<Gender>,
    /// Activity level
    pub activity_level: Option<ActivityLevel>,
    /// Goal
    pub goal: Option<Goal>,
    /// Fitness level
    pub fitness_level: Option<FitnessLevel>,
    /// Weekly weight change target in kg, one decimal place
    pub weekly_weight_change: f64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Convert the stored row into calculator input
    #[must_use]
    pub fn to_input(&self) -> ProfileInput {
        ProfileInput {
            weight: self.weight.map(LenientNumber::from),
            height: self.height.map(LenientNumber::from),
            age: self.age.map(|a| LenientNumber::from(f64::from(a))),
            gender: self.gender.map(|g| g.as_str().to_owned()),
            activity_level: self.activity_level.map(|a| a.as_str().to_owned()),
            goal: self.goal.map(|g| g.as_str().to_owned()),
            fitness_level: self.fitness_level.map(|f| f.as_str().to_owned()),
            weekly_weight_change: Some(LenientNumber::from(self.weekly_weight_change)),
            meal_count: None,
            day_seed: None,
        }
    }
}

/// Fields accepted when creating or replacing a profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Body weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    /// Height in centimeters
    #[serde(default)]
    pub height: Option<f64>,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Gender
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Activity level
    #[serde(default)]
    pub activity_level: Option<ActivityLevel>,
    /// Goal
    #[serde(default)]
    pub goal: Option<Goal>,
    /// Fitness level
    #[serde(default)]
    pub fitness_level: Option<FitnessLevel>,
    /// Weekly weight change target in kg
    #[serde(default)]
    pub weekly_weight_change: Option<f64>,
}

impl ProfileUpdate {
    /// Reject values no body could have
    ///
    /// # Errors
    ///
    /// Returns a value-out-of-range error for weight or height outside their
    /// plausible range,
    /// an age outside `1..=MAX_AGE_YEARS`, or a weekly change beyond the cap
    pub fn validate(&self) -> AppResult<()> {
        let bad_measure =
            |v: Option<f64>, max: f64| v.is_some_and(|v| !v.is_finite() || v <= 0.0 || v > max);
        if bad_measure(self.weight, profile_defaults::MAX_WEIGHT_KG) {
            return Err(AppError::out_of_range(format!(
                "Weight must be a positive number up to {} kg",
                profile_defaults::MAX_WEIGHT_KG
            )));
        }
        if bad_measure(self.height, profile_defaults::MAX_HEIGHT_CM) {
            return Err(AppError::out_of_range(format!(
                "Height must be a positive number up to {} cm",
                profile_defaults::MAX_HEIGHT_CM
            )));
        }
        if self
            .age
            .is_some_and(|a| a == 0 || a > profile_defaults::MAX_AGE_YEARS)
        {
            return Err(AppError::out_of_range(format!(
                "Age must be between 1 and {}",
                profile_defaults::MAX_AGE_YEARS
            )));
        }
        if self.weekly_weight_change.is_some_and(|w| {
            !w.is_finite() || w.abs() > profile_defaults::MAX_WEEKLY_WEIGHT_CHANGE_KG
        }) {
            return Err(AppError::out_of_range(format!(
                "Weekly weight change must be within +/-{} kg",
                profile_defaults::MAX_WEEKLY_WEIGHT_CHANGE_KG
            )));
        }
        Ok(())
    }
}
