// ABOUTME: Prompt templates for meal plans, grocery lists and food photo analysis
// ABOUTME: Templates are loaded at compile time and filled with user-specific values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy
//! maintenance. Placeholders use the `{{name}}` form so JSON braces inside
//! the templates need no escaping.

use crate::models::MealPreferences;

/// Nutritionist instructions for a 7-day plan
pub const MEAL_PLAN_TEMPLATE: &str = include_str!("meal_plan.md");

/// Literal structure the meal plan response must follow
pub const EXAMPLE_MEAL_STRUCTURE: &str = include_str!("example_meal_plan.json");

/// Shopping assistant instructions
pub const GROCERY_TEMPLATE: &str = include_str!("grocery.md");

/// Vision instructions demanding strict JSON
pub const FOOD_IMAGE_TEMPLATE: &str = include_str!("food_image.md");

/// Substitute `{{key}}` placeholders
fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_owned(), |text, (key, value)| {
            text.replace(&format!("{{{{{key}}}}}"), value)
        })
}

fn or_default<'a>(text: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

/// Build the meal plan prompt
#[must_use]
pub fn meal_plan_prompt(calorie_target: u32, preferences: &MealPreferences) -> String {
    let restrictions = if preferences.restrictions.is_empty() {
        "None".to_owned()
    } else {
        preferences
            .restrictions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let goal = preferences.goal.to_string();
    let target = calorie_target.to_string();

    render(
        MEAL_PLAN_TEMPLATE,
        &[
            ("calorie_target", target.as_str()),
            ("goal", goal.as_str()),
            ("restrictions", restrictions.as_str()),
            ("favorites", or_default(&preferences.favorites, "Any")),
            ("dislikes", or_default(&preferences.dislikes, "None")),
            ("example_structure", EXAMPLE_MEAL_STRUCTURE.trim_end()),
        ],
    )
}

/// Build the grocery list prompt for an already deduplicated dish list
#[must_use]
pub fn grocery_prompt(dishes: &[String], language: &str) -> String {
    let dishes = dishes.join(", ");
    render(
        GROCERY_TEMPLATE,
        &[("dishes", dishes.as_str()), ("language", language)],
    )
}

/// Build the food photo analysis prompt
#[must_use]
pub fn food_image_prompt(language: &str) -> String {
    render(FOOD_IMAGE_TEMPLATE, &[("language", language)])
        .trim_end()
        .to_owned()
}
