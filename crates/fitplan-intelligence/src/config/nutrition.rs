// ABOUTME: Nutrition configuration for the metabolic calculator
// ABOUTME: BMR coefficients, activity factors, goal offsets, macro ratios, and floors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Metabolic Calculator Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Nutrition configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionConfig {
    /// Mifflin-St Jeor coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie offsets per goal
    pub goal_offsets: GoalOffsetConfig,
    /// Protein and fat ratios per goal
    pub macronutrients: MacronutrientConfig,
    /// Minimum daily calories
    pub calorie_floors: CalorieFloorConfig,
    /// Fiber and water targets
    pub micronutrients: MicronutrientConfig,
}

/// Mifflin-St Jeor equation coefficients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub weight_coef: f64,
    /// Height coefficient (6.25)
    pub height_coef: f64,
    /// Age coefficient (-5.0)
    pub age_coef: f64,
    /// Male constant (+5)
    pub male_constant: f64,
    /// Female constant (-161)
    pub female_constant: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Very active: 1.725
    pub very_active: f64,
    /// Extra active: 1.9
    pub extra_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

/// One BMI band of a tiered calorie offset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BmiTier {
    /// BMI bound of the band
    pub bmi_bound: f64,
    /// Calorie offset magnitude (kcal/day)
    pub kcal: f64,
}

/// Calorie offsets applied to TDEE when no weekly change target is set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalOffsetConfig {
    /// Deficits for weight loss, checked in order; applies when BMI is above the bound
    pub loss_deficits: Vec<BmiTier>,
    /// Deficit when no loss tier matches
    pub loss_deficit_default: f64,
    /// Surpluses for gain goals, checked in order; applies when BMI is below the bound
    pub gain_surpluses: Vec<BmiTier>,
    /// Surplus when no gain tier matches
    pub gain_surplus_default: f64,
}

impl Default for GoalOffsetConfig {
    fn default() -> Self {
        Self {
            loss_deficits: vec![
                BmiTier {
                    bmi_bound: 35.0,
                    kcal: 750.0,
                },
                BmiTier {
                    bmi_bound: 30.0,
                    kcal: 600.0,
                },
                BmiTier {
                    bmi_bound: 25.0,
                    kcal: 500.0,
                },
            ],
            loss_deficit_default: 300.0,
            gain_surpluses: vec![
                BmiTier {
                    bmi_bound: 18.5,
                    kcal: 600.0,
                },
                BmiTier {
                    bmi_bound: 22.0,
                    kcal: 500.0,
                },
                BmiTier {
                    bmi_bound: 25.0,
                    kcal: 400.0,
                },
            ],
            gain_surplus_default: 300.0,
        }
    }
}

/// Protein (g/kg) and fat-share settings per goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacronutrientConfig {
    /// Maintenance protein: 2.0 g/kg
    pub maintain_protein_g_per_kg: f64,
    /// Weight loss protein: 2.2 g/kg
    pub loss_protein_g_per_kg: f64,
    /// Weight loss protein when BMI exceeds `high_bmi_threshold`: 2.4 g/kg
    pub loss_high_bmi_protein_g_per_kg: f64,
    /// BMI above which the higher loss protein applies
    pub high_bmi_threshold: f64,
    /// Gain protein: 2.6 g/kg
    pub gain_protein_g_per_kg: f64,
    /// Protein for non-loss weekly change targets: 2.4 g/kg
    pub weekly_target_gain_protein_g_per_kg: f64,
    /// Share of non-protein calories from fat when maintaining
    pub maintain_fat_ratio: f64,
    /// Share of non-protein calories from fat when losing
    pub loss_fat_ratio: f64,
    /// Share of non-protein calories from fat when gaining
    pub gain_fat_ratio: f64,
}

impl Default for MacronutrientConfig {
    fn default() -> Self {
        Self {
            maintain_protein_g_per_kg: 2.0,
            loss_protein_g_per_kg: 2.2,
            loss_high_bmi_protein_g_per_kg: 2.4,
            high_bmi_threshold: 30.0,
            gain_protein_g_per_kg: 2.6,
            weekly_target_gain_protein_g_per_kg: 2.4,
            maintain_fat_ratio: 0.28,
            loss_fat_ratio: 0.30,
            gain_fat_ratio: 0.25,
        }
    }
}

/// Minimum daily calories by gender and age band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalorieFloorConfig {
    /// Age at which the lower floor starts
    pub older_age_threshold: u32,
    /// Female floor below the age threshold
    pub female: f64,
    /// Female floor at or above the age threshold
    pub female_older: f64,
    /// Male floor below the age threshold
    pub male: f64,
    /// Male floor at or above the age threshold
    pub male_older: f64,
}

impl Default for CalorieFloorConfig {
    fn default() -> Self {
        Self {
            older_age_threshold: 50,
            female: 1200.0,
            female_older: 1100.0,
            male: 1500.0,
            male_older: 1400.0,
        }
    }
}

/// Fiber and hydration targets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MicronutrientConfig {
    /// Fiber grams per 1000 kcal
    pub fiber_g_per_1000_kcal: f64,
    /// Minimum fiber (g)
    pub fiber_min_g: f64,
    /// Maximum fiber (g)
    pub fiber_max_g: f64,
    /// Water per kg of body weight (ml)
    pub water_ml_per_kg: f64,
    /// Extra water for very or extra active people (ml)
    pub water_active_bonus_ml: f64,
}

impl Default for MicronutrientConfig {
    fn default() -> Self {
        Self {
            fiber_g_per_1000_kcal: 14.0,
            fiber_min_g: 25.0,
            fiber_max_g: 35.0,
            water_ml_per_kg: 35.0,
            water_active_bonus_ml: 500.0,
        }
    }
}

impl NutritionConfig {
    /// Validate coefficient ranges
    ///
    /// # Errors
    ///
    /// Returns an error if any factor, ratio, or floor is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = &self.activity_factors;
        let all_factors = [
            factors.sedentary,
            factors.light,
            factors.moderate,
            factors.very_active,
            factors.extra_active,
        ];
        if all_factors.iter().any(|f| !(1.0..=3.0).contains(f)) {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be between 1.0 and 3.0",
            ));
        }

        let macros = &self.macronutrients;
        let fat_ratios = [
            macros.maintain_fat_ratio,
            macros.loss_fat_ratio,
            macros.gain_fat_ratio,
        ];
        if fat_ratios.iter().any(|r| *r <= 0.0 || *r >= 1.0) {
            return Err(ConfigError::InvalidRange(
                "Fat ratios must be strictly between 0 and 1",
            ));
        }

        let protein = [
            macros.maintain_protein_g_per_kg,
            macros.loss_protein_g_per_kg,
            macros.loss_high_bmi_protein_g_per_kg,
            macros.gain_protein_g_per_kg,
            macros.weekly_target_gain_protein_g_per_kg,
        ];
        if protein.iter().any(|p| *p <= 0.0) {
            return Err(ConfigError::InvalidRange(
                "Protein targets must be positive",
            ));
        }

        let floors = &self.calorie_floors;
        if [
            floors.female,
            floors.female_older,
            floors.male,
            floors.male_older,
        ]
        .iter()
        .any(|f| *f <= 0.0)
        {
            return Err(ConfigError::InvalidRange("Calorie floors must be positive"));
        }

        let micro = &self.micronutrients;
        if micro.fiber_min_g > micro.fiber_max_g {
            return Err(ConfigError::InvalidRange(
                "Fiber minimum must not exceed the maximum",
            ));
        }

        Ok(())
    }
}
