// ABOUTME: Configuration module for the FitPlan server
// ABOUTME: Environment-driven server settings and the planner configuration they feed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

/// Environment-driven server configuration
pub mod environment;

pub use environment::{
    BackendKind, BridgeConfig, CommandSpec, DatabaseUrl, Environment, HttpBackendConfig,
    ServerConfig,
};

use fitplan_intelligence::IntelligenceConfig;

impl ServerConfig {
    /// Planner settings with this server's overrides applied
    #[must_use]
    pub fn intelligence(&self) -> IntelligenceConfig {
        IntelligenceConfig::default().with_snack_threshold(self.snack_calorie_threshold)
    }
}
