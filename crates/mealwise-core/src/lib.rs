// ABOUTME: Core types and constants for the Mealwise meal planning assistant
// ABOUTME: Foundation crate with error handling, meal plan models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Mealwise Core
//!
//! Foundation crate providing shared types and constants for the Mealwise
//! meal planning assistant. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Meal slots, USDA nutrient identifiers, default thresholds
//! - **models**: Meal plan, nutrition, reconciliation and analysis types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`MealPlan`, `DishEntry`, `NutritionVector`, reports)
pub mod models;
