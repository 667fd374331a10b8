// ABOUTME: Domain service layer for meal plans, grocery lists and food photo analysis
// ABOUTME: MealAssistant wires every service from one AppConfig for the CLI and library users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Each service owns one primary flow and returns an [`AppResult`]. The
//! [`MealAssistant`] facade builds all of them once from an [`AppConfig`]:
//!
//! ```rust,no_run
//! use mealwise::config::AppConfig;
//! use mealwise::models::{MealPreferences, Goal};
//! use mealwise::services::MealAssistant;
//!
//! # async fn example() -> mealwise::errors::AppResult<()> {
//! let config = AppConfig::from_env()?;
//! let assistant = MealAssistant::from_config(&config);
//! let plan = assistant
//!     .generate_meal_plan(2100, &MealPreferences::for_goal(Goal::LoseWeight))
//!     .await?;
//! let report = assistant.reconcile(&plan).await;
//! # Ok(())
//! # }
//! ```

/// Food photo analysis
pub mod food_image;
/// Grocery list synthesis
pub mod grocery;
/// Meal plan generation
pub mod meal_plan;

pub use food_image::{mime_type_for_path, FoodImageAnalyzer};
pub use grocery::{collect_dish_names, GrocerySynthesizer};
pub use meal_plan::{parse_meal_plan_response, MealPlanRequester};

use crate::config::{AppConfig, CalorieTargetConfig};
use crate::errors::AppResult;
use crate::external::{FoodDataSource, UsdaClient};
use crate::intelligence::{
    calculate_calorie_target, CalorieTarget, NutritionLookup, NutritionReconciler,
};
use crate::llm::{GeminiProvider, LlmProvider};
use crate::models::{
    FoodImageAnalysis, GroceryList, MealPlan, MealPreferences, ReconciliationReport, UserProfile,
};
use std::sync::Arc;
use tracing::info;

/// Entry point bundling every meal-planning flow
#[derive(Clone)]
pub struct MealAssistant {
    calorie_config: CalorieTargetConfig,
    lookup: NutritionLookup,
    meal_plans: MealPlanRequester,
    reconciler: NutritionReconciler,
    grocery: GrocerySynthesizer,
    images: FoodImageAnalyzer,
}

impl MealAssistant {
    /// Build the Gemini provider and (when keyed) the USDA client from config
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let provider: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::from_config(&config.gemini));
        let food_source = UsdaClient::from_app_config(config)
            .map(|client| Arc::new(client) as Arc<dyn FoodDataSource>);
        Self::new(config, provider, food_source)
    }

    /// Wire services around explicit collaborators
    #[must_use]
    pub fn new(
        config: &AppConfig,
        provider: Arc<dyn LlmProvider>,
        food_source: Option<Arc<dyn FoodDataSource>>,
    ) -> Self {
        let lookup = NutritionLookup::from_source(food_source, config.lookup.clone());
        info!(
            provider = provider.name(),
            model = provider.default_model(),
            lookup_enabled = lookup.is_enabled(),
            "Meal assistant ready"
        );

        Self {
            calorie_config: config.calorie_target.clone(),
            meal_plans: MealPlanRequester::new(Arc::clone(&provider), config.timeouts.meal_plan),
            reconciler: NutritionReconciler::new(lookup.clone(), config.reconciliation.clone()),
            grocery: GrocerySynthesizer::new(Arc::clone(&provider), config.timeouts.grocery),
            images: FoodImageAnalyzer::new(provider, lookup.clone(), config.timeouts.vision),
            lookup,
        }
    }

    /// Whether nutrition database verification is available
    #[must_use]
    pub fn lookup_enabled(&self) -> bool {
        self.lookup.is_enabled()
    }

    /// Daily calorie target for a profile
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the profile is outside the supported ranges.
    pub fn calorie_target(&self, profile: &UserProfile) -> AppResult<CalorieTarget> {
        calculate_calorie_target(profile, &self.calorie_config)
    }

    /// Generate a 7-day plan
    ///
    /// # Errors
    ///
    /// See [`MealPlanRequester::generate`].
    pub async fn generate_meal_plan(
        &self,
        calorie_target: u32,
        preferences: &MealPreferences,
    ) -> AppResult<MealPlan> {
        self.meal_plans.generate(calorie_target, preferences).await
    }

    /// Cross-check a plan against the nutrition database
    pub async fn reconcile(&self, plan: &MealPlan) -> ReconciliationReport {
        self.reconciler.reconcile(plan).await
    }

    /// Shopping list for a plan
    ///
    /// # Errors
    ///
    /// See [`GrocerySynthesizer::synthesize`].
    pub async fn grocery_list(&self, plan: &MealPlan) -> AppResult<GroceryList> {
        self.grocery.synthesize(plan).await
    }

    /// Shopping list in a specific language
    ///
    /// # Errors
    ///
    /// See [`GrocerySynthesizer::synthesize`].
    pub async fn grocery_list_in(&self, plan: &MealPlan, language: &str) -> AppResult<GroceryList> {
        self.grocery
            .clone()
            .with_language(language)
            .synthesize(plan)
            .await
    }

    /// Analyze a food photo
    ///
    /// # Errors
    ///
    /// See [`FoodImageAnalyzer::analyze_with_mime`].
    pub async fn analyze_image(
        &self,
        image: &[u8],
        mime_type: &str,
        language: &str,
    ) -> AppResult<FoodImageAnalysis> {
        self.images
            .analyze_with_mime(image, mime_type, language)
            .await
    }
}
