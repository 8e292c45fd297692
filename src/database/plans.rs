// ABOUTME: Saved exercise and diet plan persistence
// ABOUTME: Create and list only; rows are never updated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use fitplan_core::models::{CreateDietPlan, CreateExercisePlan, DietPlanRecord, ExercisePlanRecord};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Save an exercise plan for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_exercise_plan(
        &self,
        user_id: Uuid,
        plan: &CreateExercisePlan,
    ) -> AppResult<ExercisePlanRecord> {
        let record = ExercisePlanRecord {
            id: Uuid::new_v4(),
            user_id,
            name: plan.name.trim().to_owned(),
            description: plan.description.clone(),
            duration_minutes: plan.duration_minutes,
            difficulty: plan.difficulty.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO exercise_plans (id, user_id, name, description, duration_minutes, difficulty, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id.to_string())
        .bind(&record.name)
        .bind(record.description.as_deref())
        .bind(record.duration_minutes.map(i64::from))
        .bind(record.difficulty.as_deref())
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save exercise plan: {e}")))?;

        Ok(record)
    }

    /// List a user's exercise plans, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is corrupt
    pub async fn list_exercise_plans(&self, user_id: Uuid) -> AppResult<Vec<ExercisePlanRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, duration_minutes, difficulty, created_at
            FROM exercise_plans
            WHERE user_id = ?1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercise plans: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let owner: String = row.get("user_id");
                let created_at: String = row.get("created_at");
                let duration: Option<i64> = row.get("duration_minutes");
                Ok(ExercisePlanRecord {
                    id: parse_uuid(&id)?,
                    user_id: parse_uuid(&owner)?,
                    name: row.get("name"),
                    description: row.get("description"),
                    duration_minutes: duration.and_then(|d| u32::try_from(d).ok()),
                    difficulty: row.get("difficulty"),
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }

    /// Save a diet plan for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_diet_plan(
        &self,
        user_id: Uuid,
        plan: &CreateDietPlan,
    ) -> AppResult<DietPlanRecord> {
        let record = DietPlanRecord {
            id: Uuid::new_v4(),
            user_id,
            name: plan.name.trim().to_owned(),
            description: plan.description.clone(),
            calories: plan.calories,
            protein: plan.protein,
            carbs: plan.carbs,
            fat: plan.fat,
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO diet_plans (id, user_id, name, description, calories, protein, carbs, fat, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(record.id.to_string())
        .bind(user_id.to_string())
        .bind(&record.name)
        .bind(record.description.as_deref())
        .bind(record.calories)
        .bind(record.protein)
        .bind(record.carbs)
        .bind(record.fat)
        .bind(record.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save diet plan: {e}")))?;

        Ok(record)
    }

    /// List a user's diet plans, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is corrupt
    pub async fn list_diet_plans(&self, user_id: Uuid) -> AppResult<Vec<DietPlanRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, description, calories, protein, carbs, fat, created_at
            FROM diet_plans
            WHERE user_id = ?1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list diet plans: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let owner: String = row.get("user_id");
                let created_at: String = row.get("created_at");
                Ok(DietPlanRecord {
                    id: parse_uuid(&id)?,
                    user_id: parse_uuid(&owner)?,
                    name: row.get("name"),
                    description: row.get("description"),
                    calories: row.get("calories"),
                    protein: row.get("protein"),
                    carbs: row.get("carbs"),
                    fat: row.get("fat"),
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }
}
