// ABOUTME: Configuration management module for API credentials and tuning parameters
// ABOUTME: Environment loading plus calorie target coefficients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for Mealwise
//!
//! - **Environment**: credentials, base URLs, thresholds and timeouts read once
//! - **Nutrition**: BMR, activity and goal coefficients for calorie targets

/// Environment configuration
pub mod environment;
/// Calorie target coefficients
pub mod nutrition;

pub use environment::{
    AppConfig, GeminiApiConfig, LookupConfig, ReconciliationConfig, TimeoutConfig, UsdaApiConfig,
};
pub use nutrition::{ActivityFactorsConfig, BmrConfig, CalorieTargetConfig, GoalAdjustmentConfig};
