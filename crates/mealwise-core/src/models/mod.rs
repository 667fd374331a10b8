// ABOUTME: Core data models shared by the requester, reconciler, synthesizer and analyzer
// ABOUTME: Re-exports meal plan, nutrition, reconciliation, analysis and profile types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! A [`MealPlan`] is ingested once from the model's loosely-typed JSON and
//! never mutated afterwards. Reconciliation, grocery synthesis and display all
//! borrow it.

/// Grocery list and food photo analysis
pub mod analysis;
/// Meal plan, days, slots and dishes
pub mod meal_plan;
/// Macro-nutrient vector
pub mod nutrition;
/// User profile and preferences
pub mod profile;
/// Reconciliation report
pub mod reconciliation;

pub use analysis::{EstimatedMacros, FoodImageAnalysis, GroceryList, NutritionSource};
pub use meal_plan::{
    day_ordinal, lenient_number, DayPlan, DaySummary, DishEntry, MealPlan, MealSlot, MEAL_PLAN_KEY,
};
pub use nutrition::{Macro, NutritionVector};
pub use profile::{ActivityLevel, BiologicalSex, Goal, MealPreferences, UserProfile};
pub use reconciliation::{DishDiscrepancy, MacroDiscrepancy, ReconciliationReport};
