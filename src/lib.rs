// ABOUTME: Main library entry point for the Mealwise meal planning assistant
// ABOUTME: AI-generated meal plans cross-checked against USDA data, grocery lists and photo analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy.
#![deny(unsafe_code)]

//! # Mealwise
//!
//! A meal-planning assistant built around a generative model and the USDA
//! `FoodData` Central database.
//!
//! ## Features
//!
//! - **Calorie targets**: Mifflin-St Jeor BMR, activity factor and goal adjustment
//! - **Meal plans**: structured 7-day plans requested from Gemini
//! - **Verification**: fuzzy-matched database references and per-macro variance
//! - **Grocery lists**: consolidated, categorized ingredients for a plan
//! - **Photo analysis**: vision estimate enriched with database nutrition
//!
//! ## Architecture
//!
//! - **LLM**: provider trait, Gemini implementation and prompt templates
//! - **Extraction**: tolerant recovery of JSON from free model text
//! - **External**: USDA search client with cache, rate limiting and a mock
//! - **Intelligence**: calorie calculator, fuzzy matching, lookup, reconciler
//! - **Services**: the primary flows and the [`services::MealAssistant`] facade
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealwise::config::AppConfig;
//! use mealwise::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Configuration loaded once from the environment
pub mod config;

/// Application constants (re-exported from `mealwise-core`)
pub mod constants;

/// Unified error handling (re-exported from `mealwise-core`)
pub mod errors;

/// Response extraction from free-form model text
pub mod extraction;

/// External API clients
pub mod external;

/// Calorie targets, fuzzy matching, nutrition lookup and reconciliation
pub mod intelligence;

/// Generative model providers and prompts
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Domain models (re-exported from `mealwise-core`)
pub mod models;

/// Meal plan, grocery and image analysis services
pub mod services;

/// HTTP client helpers
pub mod utils;
