// ABOUTME: SQLite storage for user profiles and saved exercise and diet plans
// ABOUTME: Connection setup and idempotent schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Database Management
//!
//! One `profiles` row per user plus append-only `exercise_plans` and
//! `diet_plans` rows. Migrations run on every start and only ever add.

mod plans;
mod profiles;

pub use profiles::round_weekly_change;

use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use tracing::info;

/// Database manager for profile and plan storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to `database_url` and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let is_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if is_memory {
            database_url.to_owned()
        } else {
            if let Some(parent) = database_url
                .strip_prefix("sqlite:")
                .map(|p| Path::new(p.trim_start_matches("//")))
                .and_then(Path::parent)
                .filter(|p| !p.as_os_str().is_empty())
            {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
            format!("{database_url}?mode=rwc")
        };

        // Every in-memory connection is its own database, so keep exactly one
        let max_connections = if is_memory { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_profiles().await?;
        self.migrate_plans().await?;
        Ok(())
    }

    /// Cheap connectivity probe for readiness checks
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot run a query
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    async fn column_exists(&self, table: &str, column: &str) -> AppResult<bool> {
        let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to inspect {table}: {e}")))?;
        Ok(rows
            .iter()
            .any(|row| row.get::<String, _>("name") == column))
    }

    async fn execute_schema(&self, sql: &str, what: &str) -> AppResult<()> {
        sqlx::query(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to {what}: {e}")))?;
        Ok(())
    }

    async fn migrate_profiles(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                full_name TEXT,
                weight REAL,
                height REAL,
                age INTEGER,
                gender TEXT CHECK (gender IN ('male', 'female')),
                activity_level TEXT,
                goal TEXT,
                fitness_level TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "create profiles table",
        )
        .await?;

        if !self.column_exists("profiles", "weekly_weight_change").await? {
            info!("Adding weekly_weight_change column to profiles");
            self.execute_schema(
                "ALTER TABLE profiles ADD COLUMN weekly_weight_change REAL NOT NULL DEFAULT 0",
                "add weekly_weight_change column",
            )
            .await?;
        }
        Ok(())
    }

    async fn migrate_plans(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS exercise_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                duration_minutes INTEGER,
                difficulty TEXT,
                created_at TEXT NOT NULL
            )
            ",
            "create exercise_plans table",
        )
        .await?;

        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS diet_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                calories INTEGER,
                protein INTEGER,
                carbs INTEGER,
                fat INTEGER,
                created_at TEXT NOT NULL
            )
            ",
            "create diet_plans table",
        )
        .await?;

        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_exercise_plans_user ON exercise_plans(user_id, created_at)",
            "create exercise plan index",
        )
        .await?;
        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_diet_plans_user ON diet_plans(user_id, created_at)",
            "create diet plan index",
        )
        .await
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(raw: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp {raw:?}: {e}")))
}

/// Parse a UUID column
pub(crate) fn parse_uuid(raw: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid stored id {raw:?}: {e}")))
}
