// ABOUTME: Application constants re-exported from mealwise-core
// ABOUTME: Meal slots, USDA nutrient names, default thresholds and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealwise_core::constants::*;
