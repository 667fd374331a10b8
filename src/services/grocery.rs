// ABOUTME: Grocery list synthesizer producing a categorized shopping list for a meal plan
// ABOUTME: Deduplicates dish names, asks the model for ingredients and strips the markdown fence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::extraction::strip_fence;
use crate::llm::prompts::grocery_prompt;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{GroceryList, MealPlan};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Every named dish of the plan, deduplicated and sorted
///
/// Identical plans always yield identical lists.
#[must_use]
pub fn collect_dish_names(plan: &MealPlan) -> Vec<String> {
    plan.named_dishes()
        .filter_map(|(_, _, dish)| dish.name())
        .map(ToOwned::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Builds shopping lists through the generative model
#[derive(Clone)]
pub struct GrocerySynthesizer {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
    temperature: f32,
    language: String,
}

impl GrocerySynthesizer {
    /// Create a synthesizer producing English ingredient names
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            temperature: defaults::GROCERY_TEMPERATURE,
            language: defaults::LANGUAGE.to_owned(),
        }
    }

    /// Language for ingredient names
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Shopping list for every dish of a plan
    ///
    /// # Errors
    ///
    /// `NoDishesFound` when the plan has no named dish (no model call is
    /// made), otherwise as [`GrocerySynthesizer::synthesize_for_dishes`].
    pub async fn synthesize(&self, plan: &MealPlan) -> AppResult<GroceryList> {
        self.synthesize_for_dishes(collect_dish_names(plan)).await
    }

    /// Shopping list for an explicit dish set
    ///
    /// # Errors
    ///
    /// - `NoDishesFound` for an empty dish set
    /// - transport errors from the provider
    /// - `ExtractionFailed` when the reply is empty after fence stripping
    #[instrument(skip_all, fields(dishes = dishes.len()))]
    pub async fn synthesize_for_dishes(&self, dishes: Vec<String>) -> AppResult<GroceryList> {
        if dishes.is_empty() {
            return Err(AppError::no_dishes());
        }

        let request = ChatRequest::new(vec![ChatMessage::user(grocery_prompt(
            &dishes,
            &self.language,
        ))])
        .with_temperature(self.temperature)
        .with_timeout(self.timeout);

        let response = self.provider.complete(&request).await?;
        let markdown = strip_fence(&response.content);
        if markdown.is_empty() {
            return Err(AppError::extraction_failed(
                "The model returned an empty grocery list",
            ));
        }

        info!(chars = markdown.len(), "Grocery list generated");
        Ok(GroceryList {
            markdown: markdown.to_owned(),
            dishes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, DishEntry, MealSlot, NutritionVector};

    #[test]
    fn test_collect_dish_names_dedupes_and_sorts() {
        let mut day1 = DayPlan::new("day1");
        day1.dishes_mut(MealSlot::Breakfast)
            .push(DishEntry::named("Oatmeal", 250.0, NutritionVector::default()));
        day1.dishes_mut(MealSlot::Snacks)
            .push(DishEntry::named("Apple", 150.0, NutritionVector::default()));
        let mut day2 = DayPlan::new("day2");
        day2.dishes_mut(MealSlot::Breakfast)
            .push(DishEntry::named("Oatmeal", 250.0, NutritionVector::default()));
        day2.dishes_mut(MealSlot::Lunch).push(DishEntry {
            dish_name: None,
            ..DishEntry::named("", 100.0, NutritionVector::default())
        });

        let plan = MealPlan {
            days: vec![day1, day2],
        };
        assert_eq!(collect_dish_names(&plan), vec!["Apple", "Oatmeal"]);
    }

    #[test]
    fn test_collect_dish_names_empty_plan() {
        assert!(collect_dish_names(&MealPlan::default()).is_empty());
    }
}
