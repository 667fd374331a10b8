// ABOUTME: Core data models re-exported from mealwise-core
// ABOUTME: Re-exports MealPlan, DishEntry, NutritionVector, reports and profile types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealwise_core::models::*;
