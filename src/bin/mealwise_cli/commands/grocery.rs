// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Grocery list command for the mealwise CLI
// ABOUTME: Builds a categorized shopping list for a saved plan

use super::build_assistant;
use crate::helpers::display::display_grocery_list;
use crate::helpers::plan_file::load_plan;
use anyhow::Result;
use std::path::Path;

/// Print the grocery list for a saved plan
pub async fn run(path: &Path, language: &str) -> Result<()> {
    let plan = load_plan(path).await?;
    let assistant = build_assistant()?;
    let list = assistant.grocery_list_in(&plan, language).await?;
    display_grocery_list(&list);
    Ok(())
}
