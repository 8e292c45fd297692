// ABOUTME: Profile persistence: one row per user, last write wins
// ABOUTME: Weekly weight change is stored rounded to one decimal place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use fitplan_core::models::{ActivityLevel, FitnessLevel, Gender, Goal, ProfileUpdate, UserProfile};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// Round a weekly weight change to one decimal place
#[must_use]
pub fn round_weekly_change(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Database {
    /// Get a user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is corrupt
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, full_name, weight, height, age, gender, activity_level,
                   goal, fitness_level, weekly_weight_change, created_at, updated_at
            FROM profiles
            WHERE user_id = ?1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.map(|r| row_to_profile(&r)).transpose()
    }

    /// Create or replace a user's profile
    ///
    /// Fields absent from `update` are cleared. The creation time of an
    /// existing row is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails
    pub async fn upsert_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<UserProfile> {
        let now = Utc::now().to_rfc3339();
        let weekly_weight_change = round_weekly_change(update.weekly_weight_change.unwrap_or(0.0));

        sqlx::query(
            r"
            INSERT INTO profiles (
                user_id, full_name, weight, height, age, gender, activity_level,
                goal, fitness_level, weekly_weight_change, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
            ON CONFLICT(user_id) DO UPDATE SET
                full_name = excluded.full_name,
                weight = excluded.weight,
                height = excluded.height,
                age = excluded.age,
                gender = excluded.gender,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                fitness_level = excluded.fitness_level,
                weekly_weight_change = excluded.weekly_weight_change,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(update.full_name.as_deref())
        .bind(update.weight)
        .bind(update.height)
        .bind(update.age.map(i64::from))
        .bind(update.gender.map(Gender::as_str))
        .bind(update.activity_level.map(ActivityLevel::as_str))
        .bind(update.goal.map(Goal::as_str))
        .bind(update.fitness_level.map(FitnessLevel::as_str))
        .bind(weekly_weight_change)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save profile: {e}")))?;

        self.get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::internal("Profile missing after save"))
    }
}

fn row_to_profile(row: &SqliteRow) -> AppResult<UserProfile> {
    let user_id: String = row.get("user_id");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let age: Option<i64> = row.get("age");

    Ok(UserProfile {
        user_id: parse_uuid(&user_id)?,
        full_name: row.get("full_name"),
        weight: row.get("weight"),
        height: row.get("height"),
        age: age.and_then(|a| u32::try_from(a).ok()),
        gender: row
            .get::<Option<String>, _>("gender")
            .map(|g| Gender::from_str_lossy(&g)),
        activity_level: row
            .get::<Option<String>, _>("activity_level")
            .map(|a| ActivityLevel::from_str_lossy(&a)),
        goal: row
            .get::<Option<String>, _>("goal")
            .map(|g| Goal::from_str_lossy(&g)),
        fitness_level: row
            .get::<Option<String>, _>("fitness_level")
            .and_then(|f| FitnessLevel::parse(&f)),
        weekly_weight_change: row.get("weekly_weight_change"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
