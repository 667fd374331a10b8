// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Meal plan generation command for the mealwise CLI
// ABOUTME: Generates, displays and optionally saves, verifies and shops for a plan

use super::build_assistant;
use crate::helpers::display::{
    display_grocery_list, display_meal_plan, display_reconciliation, display_weekly_summary,
};
use crate::helpers::plan_file::save_plan;
use anyhow::Result;
use mealwise::models::{MealPreferences, UserProfile};
use std::path::PathBuf;
use tracing::info;

/// Everything the `plan` command was asked to do
pub struct PlanOptions {
    /// Profile for the calorie target
    pub profile: UserProfile,
    /// Prompt preferences
    pub preferences: MealPreferences,
    /// Explicit calorie target overriding the profile
    pub calories: Option<u32>,
    /// Where to save the plan
    pub output: Option<PathBuf>,
    /// Run reconciliation
    pub verify: bool,
    /// Build the grocery list
    pub grocery: bool,
    /// Grocery item language
    pub language: String,
}

/// Generate a plan and run the requested follow-ups
pub async fn run(options: PlanOptions) -> Result<()> {
    let assistant = build_assistant()?;

    let calories = match options.calories {
        Some(calories) => calories,
        None => assistant.calorie_target(&options.profile)?.target_kcal,
    };
    println!("Targeting approximately {calories} kcal/day. Generating plan...");

    let plan = assistant
        .generate_meal_plan(calories, &options.preferences)
        .await?;
    display_meal_plan(&plan);
    display_weekly_summary(&plan);

    if let Some(path) = &options.output {
        save_plan(path, &plan).await?;
        info!(path = %path.display(), "Meal plan saved");
        println!("\nPlan saved to {}", path.display());
    }

    if options.verify {
        if assistant.lookup_enabled() {
            let report = assistant.reconcile(&plan).await;
            display_reconciliation(&report);
        } else {
            eprintln!("\nVerification skipped: USDA_API_KEY is not configured");
        }
    }

    if options.grocery {
        let list = assistant.grocery_list_in(&plan, &options.language).await?;
        display_grocery_list(&list);
    }

    Ok(())
}
