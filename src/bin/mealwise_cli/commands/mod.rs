// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Command modules for the mealwise CLI
// ABOUTME: Shared assistant construction from environment configuration

pub mod analyze_image;
pub mod grocery;
pub mod plan;
pub mod target;
pub mod verify;

use anyhow::Result;
use mealwise::config::AppConfig;
use mealwise::services::MealAssistant;
use tracing::debug;

/// Load configuration once and wire the assistant
pub fn build_assistant() -> Result<MealAssistant> {
    let config = AppConfig::from_env()?;
    debug!("{}", config.summary());
    Ok(MealAssistant::from_config(&config))
}
