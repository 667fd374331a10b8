// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Food photo analysis command for the mealwise CLI
// ABOUTME: Reads an image file and prints the estimate with database verification

use super::build_assistant;
use crate::helpers::display::display_food_analysis;
use anyhow::{Context, Result};
use mealwise::services::mime_type_for_path;
use std::path::Path;

/// Analyze one image file
pub async fn run(path: &Path, language: &str) -> Result<()> {
    let image = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let assistant = build_assistant()?;

    let analysis = assistant
        .analyze_image(&image, mime_type_for_path(path), language)
        .await?;
    display_food_analysis(&analysis);
    Ok(())
}
