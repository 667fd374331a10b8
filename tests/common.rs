// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Quiet logging, a scripted LLM provider and small meal plan fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `mealwise`
//!
//! Each integration test binary includes this module with `mod common;`,
//! so helpers unused by one binary are expected.

use async_trait::async_trait;
use mealwise::errors::{AppError, AppResult};
use mealwise::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use mealwise::models::{DayPlan, DishEntry, MealPlan, MealSlot, NutritionVector};
use std::collections::VecDeque;
use std::sync::{Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// LLM provider replaying scripted replies and recording every request
pub struct MockLlmProvider {
    replies: Mutex<VecDeque<AppResult<String>>>,
    requests: Mutex<Vec<ChatRequest>>,
    capabilities: LlmCapabilities,
}

impl MockLlmProvider {
    /// Multimodal provider with no scripted replies
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            capabilities: LlmCapabilities::multimodal(),
        }
    }

    /// Provider answering every call, in order, with these texts
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        {
            let mut queue = provider.replies.lock().unwrap();
            queue.extend(replies.into_iter().map(|reply| Ok(reply.into())));
        }
        provider
    }

    /// Provider whose next call fails
    pub fn failing(error: AppError) -> Self {
        let provider = Self::new();
        provider.replies.lock().unwrap().push_back(Err(error));
        provider
    }

    /// Override the advertised capabilities
    pub fn with_capabilities(mut self, capabilities: LlmCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completions requested so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Text of the first message of the last request
    pub fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|request| request.messages.first())
            .map(|message| message.content.clone())
            .unwrap_or_default()
    }
}

impl Default for MockLlmProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("No scripted reply left")))?;

        Ok(ChatResponse {
            content: reply,
            model: "mock-model".to_owned(),
            usage: None,
            finish_reason: Some("STOP".to_owned()),
        })
    }
}

/// Named dish with model nutrition
pub fn dish(name: &str, portion_grams: f64, nutrition: (f64, f64, f64, f64)) -> DishEntry {
    let (calories, protein, carbs, fat) = nutrition;
    DishEntry::named(
        name,
        portion_grams,
        NutritionVector::new(calories, protein, carbs, fat),
    )
}

/// Day holding the given dishes in the given slots
pub fn day(label: &str, dishes: Vec<(MealSlot, DishEntry)>) -> DayPlan {
    let mut day = DayPlan::new(label);
    for (slot, entry) in dishes {
        day.dishes_mut(slot).push(entry);
    }
    day
}

/// Two-day plan built from dishes the mock nutrition database knows
pub fn sample_plan() -> MealPlan {
    MealPlan {
        days: vec![
            day(
                "day1",
                vec![
                    (
                        MealSlot::Breakfast,
                        dish("Oatmeal, cooked", 200.0, (142.0, 5.0, 24.0, 3.0)),
                    ),
                    (
                        MealSlot::Lunch,
                        dish(
                            "Chicken breast, baked or broiled",
                            150.0,
                            (400.0, 46.5, 0.15, 5.4),
                        ),
                    ),
                    (
                        MealSlot::Dinner,
                        dish("Mystery stew", 300.0, (450.0, 20.0, 40.0, 18.0)),
                    ),
                ],
            ),
            day(
                "day2",
                vec![
                    (
                        MealSlot::Breakfast,
                        dish("Oatmeal, cooked", 200.0, (142.0, 5.0, 24.0, 3.0)),
                    ),
                    (
                        MealSlot::Snacks,
                        dish("Apple, raw", 150.0, (78.0, 0.45, 20.7, 0.3)),
                    ),
                ],
            ),
        ],
    }
}

/// Model reply carrying a two-day plan inside a json fence
pub const FENCED_PLAN_REPLY: &str = r#"```json
{
  "meal_plan": {
    "day2": {
      "breakfast": {"dish_name": "Greek yogurt with berries", "portion_grams": 250,
                    "nutrition": {"calories": 220, "protein": 18, "carbs": 28, "fat": 4}},
      "snacks": [
        {"dish_name": "Apple, raw", "portion_grams": "150 g",
         "nutrition": {"calories": "78 kcal", "protein": 0.4, "carbs": 20.7, "fat": 0.3}},
        {"dish_name": "  ", "portion_grams": 30}
      ]
    },
    "day1": {
      "breakfast": {"dish_name": "Oatmeal, cooked", "portion_grams": 200,
                    "nutrition": {"calories": 142, "protein": 5, "carbs": 24, "fat": 3}},
      "lunch": {"dish_name": "Lentil soup", "portion_grams": 350,
                "nutrition": {"calories": 320, "protein": 21, "carbs": 48, "fat": 5}},
      "dinner": {"dish_name": "Salmon, baked or broiled", "portion_grams": 180,
                 "nutrition": {"calories": 370, "protein": 40, "carbs": 0, "fat": 22}},
      "brunch": {"dish_name": "Ignored slot"}
    }
  }
}
```"#;
