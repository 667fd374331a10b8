// ABOUTME: Nutrition intelligence: calorie targets, fuzzy matching, lookup and reconciliation
// ABOUTME: Pure algorithms plus the database-backed lookup and plan reconciler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! - [`nutrition_calculator`]: BMR, TDEE and goal-adjusted calorie target
//! - [`fuzzy`]: 0-100 string similarity
//! - [`nutrition_lookup`]: dish name to per-100 g database nutrition
//! - [`reconciler`]: plan-versus-database macro comparison

/// 0-100 string similarity
pub mod fuzzy;
/// Daily calorie target from a user profile
pub mod nutrition_calculator;
/// Dish-name nutrition lookup
pub mod nutrition_lookup;
/// Plan-versus-database reconciliation
pub mod reconciler;

pub use nutrition_calculator::{
    calculate_bmr, calculate_calorie_target, calculate_tdee, goal_adjustment, CalorieTarget,
};
pub use nutrition_lookup::{nutrition_per_100g, select_best_match, FoodMatch, NutritionLookup};
pub use reconciler::{compare_macros, NutritionReconciler};
