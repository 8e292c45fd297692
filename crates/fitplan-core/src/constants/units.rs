// ABOUTME: Energy and unit conversion constants used by the nutrition formulas
// ABOUTME: kcal per gram of each macronutrient and kcal per kilogram of body mass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// Energy in one gram of protein (kcal)
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;

/// Energy in one gram of carbohydrate (kcal)
pub const KCAL_PER_GRAM_CARB: f64 = 4.0;

/// Energy in one gram of fat (kcal)
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Energy stored in one kilogram of body mass (kcal)
pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;

/// Days in a week
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Centimeters per meter
pub const CM_PER_METER: f64 = 100.0;
