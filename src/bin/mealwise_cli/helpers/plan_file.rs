// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Saves and loads meal plans as JSON documents
// ABOUTME: Uses the same {"meal_plan": {...}} shape the model produces

use anyhow::{bail, Context, Result};
use mealwise::models::MealPlan;
use std::path::Path;

/// Write a plan as pretty-printed JSON
pub async fn save_plan(path: &Path, plan: &MealPlan) -> Result<()> {
    let body = serde_json::to_string_pretty(&plan.to_document())?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("Failed to write plan to {}", path.display()))
}

/// Read a plan saved by [`save_plan`] (or a raw model reply document)
pub async fn load_plan(path: &Path) -> Result<MealPlan> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read plan from {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&body)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let plan = MealPlan::from_document(&document)?;
    if plan.is_empty() {
        bail!("{} contains no days", path.display());
    }
    Ok(plan)
}
