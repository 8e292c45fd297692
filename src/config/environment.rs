// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses listen address, database URL, recommender backend, and bridge limits from env
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Environment-only server configuration

use anyhow::{bail, Context, Result};
use fitplan_core::constants::{defaults, env_config, ports};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Deployment environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite` (tests)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns an error for empty URLs or non-`SQLite` schemes
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            bail!("{} must not be empty", env_config::DATABASE_URL);
        }
        if let Some(path) = trimmed.strip_prefix("sqlite:") {
            let path = path.trim_start_matches("//");
            return Ok(if path == ":memory:" {
                Self::Memory
            } else {
                Self::SQLite {
                    path: PathBuf::from(path),
                }
            });
        }
        if trimmed.contains("://") {
            bail!("Unsupported database URL scheme: {trimmed}");
        }
        Ok(Self::SQLite {
            path: PathBuf::from(trimmed),
        })
    }

    /// Connection string understood by sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/fitplan.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Which recommender produces diet and exercise plans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process planners
    #[default]
    Native,
    /// Child worker process over stdin/stdout
    Process,
    /// Remote recommender over HTTP
    Http,
}

impl BackendKind {
    /// Parse a backend name
    ///
    /// # Errors
    ///
    /// Returns an error for unknown backend names
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "native" | "" => Ok(Self::Native),
            "process" | "bridge" => Ok(Self::Process),
            "http" | "remote" => Ok(Self::Http),
            other => bail!("Unknown {} value: {other}", env_config::RECOMMENDER_BACKEND),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Native => "native",
            Self::Process => "process",
            Self::Http => "http",
        })
    }
}

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path
    pub program: String,
    /// Arguments passed verbatim
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command from a program and arguments
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a whitespace separated command line (no quoting)
    ///
    /// # Errors
    ///
    /// Returns an error if the command line is empty
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let program = parts
            .next()
            .with_context(|| format!("Command line is empty: {line:?}"))?;
        Ok(Self::new(program, parts))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Process bridge settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Command producing diet recommendations
    pub diet_command: CommandSpec,
    /// Command producing exercise recommendations
    pub exercise_command: CommandSpec,
    /// Maximum concurrently running children; `None` = unbounded
    pub max_concurrent: Option<usize>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            diet_command: CommandSpec::new("fitplan-worker", ["diet"]),
            exercise_command: CommandSpec::new("fitplan-worker", ["exercise"]),
            max_concurrent: Some(defaults::BRIDGE_MAX_CONCURRENT),
        }
    }
}

/// Remote recommender settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpBackendConfig {
    /// Base URL, e.g. `http://127.0.0.1:5000`
    pub base_url: Option<String>,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: defaults::HTTP_CLIENT_TIMEOUT_SECS,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database: DatabaseUrl,
    /// Recommender backend
    pub backend: BackendKind,
    /// Process bridge settings
    pub bridge: BridgeConfig,
    /// Remote recommender settings
    pub http_backend: HttpBackendConfig,
    /// Day calories above which weekly plans add a snack
    pub snack_calorie_threshold: f64,
    /// JSON recipe catalogue; meals come from the built-in tables when unset
    pub recipe_catalogue: Option<PathBuf>,
    /// Allowed CORS origins; `*` allows any
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            database: DatabaseUrl::default(),
            backend: BackendKind::default(),
            bridge: BridgeConfig::default(),
            http_backend: HttpBackendConfig::default(),
            snack_calorie_threshold: defaults::SNACK_CALORIE_THRESHOLD,
            recipe_catalogue: None,
            cors_allowed_origins: split_origins(defaults::CORS_ALLOWED_ORIGINS),
        }
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed
    pub fn from_env() -> Result<Self> {
        let environment =
            Environment::from_str_or_default(&env_or(env_config::ENVIRONMENT, "development"));
        let database = DatabaseUrl::parse_url(&env_or(
            env_config::DATABASE_URL,
            defaults::DATABASE_URL,
        ))
        .context("Invalid DATABASE_URL")?;
        let backend = BackendKind::parse(&env_or(env_config::RECOMMENDER_BACKEND, "native"))?;

        let max_concurrent = parse_env(
            env_config::BRIDGE_MAX_CONCURRENT,
            defaults::BRIDGE_MAX_CONCURRENT,
        )?;
        let bridge = BridgeConfig {
            diet_command: CommandSpec::parse(&env_or(
                env_config::DIET_COMMAND,
                defaults::DIET_COMMAND,
            ))?,
            exercise_command: CommandSpec::parse(&env_or(
                env_config::EXERCISE_COMMAND,
                defaults::EXERCISE_COMMAND,
            ))?,
            max_concurrent: (max_concurrent > 0).then_some(max_concurrent),
        };

        let http_backend = HttpBackendConfig {
            base_url: env::var(env_config::RECOMMENDER_URL)
                .ok()
                .map(|u| u.trim().trim_end_matches('/').to_owned())
                .filter(|u| !u.is_empty()),
            timeout_secs: parse_env(
                env_config::HTTP_CLIENT_TIMEOUT_SECS,
                defaults::HTTP_CLIENT_TIMEOUT_SECS,
            )?,
        };

        let snack_calorie_threshold = parse_env(
            env_config::SNACK_CALORIE_THRESHOLD,
            defaults::SNACK_CALORIE_THRESHOLD,
        )?;
        if !snack_calorie_threshold.is_finite() || snack_calorie_threshold <= 0.0 {
            bail!("{} must be a positive number", env_config::SNACK_CALORIE_THRESHOLD);
        }

        let config = Self {
            host: env_or(env_config::HOST, defaults::HOST),
            http_port: parse_env(env_config::PORT, ports::DEFAULT_HTTP_PORT)?,
            environment,
            database,
            backend,
            bridge,
            http_backend,
            snack_calorie_threshold,
            recipe_catalogue: env::var(env_config::RECIPE_CATALOGUE_PATH)
                .ok()
                .map(|p| p.trim().to_owned())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            cors_allowed_origins: split_origins(&env_or(
                env_config::CORS_ALLOWED_ORIGINS,
                defaults::CORS_ALLOWED_ORIGINS,
            )),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field requirements
    ///
    /// # Errors
    ///
    /// Returns an error if the http backend has no URL
    pub fn validate(&self) -> Result<()> {
        if self.backend == BackendKind::Http && self.http_backend.base_url.is_none() {
            bail!(
                "{}=http requires {}",
                env_config::RECOMMENDER_BACKEND,
                env_config::RECOMMENDER_URL
            );
        }
        Ok(())
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitPlan server: {}:{} env={} database={} backend={} bridge_limit={} snack_threshold={} recipes={}",
            self.host,
            self.http_port,
            self.environment,
            self.database,
            self.backend,
            self.bridge
                .max_concurrent
                .map_or_else(|| "unbounded".to_owned(), |n| n.to_string()),
            self.snack_calorie_threshold,
            self.recipe_catalogue
                .as_ref()
                .map_or_else(|| "tables".to_owned(), |p| p.display().to_string()),
        )
    }
}
