// ABOUTME: Meal plan requester turning a calorie target and preferences into a MealPlan
// ABOUTME: Builds the nutritionist prompt, calls the model and ingests the strict JSON reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::extraction::{extract_json, ExtractionMode};
use crate::llm::prompts::meal_plan_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{MealPlan, MealPreferences, MEAL_PLAN_KEY};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Requests 7-day meal plans from the generative model
#[derive(Clone)]
pub struct MealPlanRequester {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
    temperature: f32,
}

impl MealPlanRequester {
    /// Create a requester with the default sampling temperature
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            temperature: defaults::MEAL_PLAN_TEMPERATURE,
        }
    }

    /// Override the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model request for a target and preferences
    #[must_use]
    pub fn build_request(&self, calorie_target: u32, preferences: &MealPreferences) -> ChatRequest {
        ChatRequest::new(vec![ChatMessage::user(meal_plan_prompt(
            calorie_target,
            preferences,
        ))])
        .with_temperature(self.temperature)
        .with_timeout(self.timeout)
    }

    /// Generate and ingest a meal plan
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when `calorie_target` is zero
    /// - transport errors from the provider
    /// - `ExtractionFailed` when the reply holds no JSON object
    /// - `ParseFailed` when the JSON lacks a usable `meal_plan`
    #[instrument(skip(self, preferences), fields(goal = %preferences.goal))]
    pub async fn generate(
        &self,
        calorie_target: u32,
        preferences: &MealPreferences,
    ) -> AppResult<MealPlan> {
        if calorie_target == 0 {
            return Err(AppError::invalid_input("Calorie target must be positive"));
        }

        let request = self.build_request(calorie_target, preferences);
        let response = self.provider.complete(&request).await?;

        let plan = parse_meal_plan_response(&response.content).inspect_err(|e| {
            warn!(error = %e, "Model reply could not be turned into a meal plan");
        })?;
        info!(days = plan.len(), "Meal plan generated");
        Ok(plan)
    }
}

/// Parse a model reply into a meal plan
///
/// The reply must be a JSON object (bare or in a ```` ```json ```` fence)
/// with a `meal_plan` object holding at least one day.
///
/// # Errors
///
/// `ExtractionFailed` when no object is found, `ParseFailed` otherwise.
pub fn parse_meal_plan_response(text: &str) -> AppResult<MealPlan> {
    let document = extract_json(text, ExtractionMode::Strict)?;

    let days = document
        .get(MEAL_PLAN_KEY)
        .filter(|days| days.is_object())
        .ok_or_else(|| {
            let keys: Vec<&str> = document
                .as_object()
                .map(|object| object.keys().map(String::as_str).collect())
                .unwrap_or_default();
            AppError::parse_failed(format!(
                "Response has no '{MEAL_PLAN_KEY}' object"
            ))
            .with_details(json!({ "keys": keys }))
        })?;

    let plan = MealPlan::from_value(days)?;
    if plan.is_empty() {
        return Err(AppError::parse_failed("Meal plan contains no days"));
    }
    Ok(plan)
}
