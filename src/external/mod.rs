// ABOUTME: External API client modules (USDA FoodData Central)
// ABOUTME: Provides the food search abstraction, the live client and its mock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! Nutrition verification talks to the database only through
//! [`FoodDataSource`], so lookups can run against [`MockUsdaClient`].

pub mod usda_client;

pub use usda_client::{
    FoodDataSource, FoodNutrient, FoodSearchResult, MockUsdaClient, UsdaClient, UsdaClientConfig,
};
