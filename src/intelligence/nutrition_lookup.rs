// ABOUTME: Resolves a dish name to per-100 g nutrition using fuzzy-matched database candidates
// ABOUTME: Misses and transport failures are logged and reported as None, never as errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Lookup
//!
//! 1. search the database with the dish name and dataset filter
//! 2. score every candidate description with [`fuzzy::ratio`] (lowercased)
//! 3. keep the best score, first candidate winning ties, if it reaches the
//!    configured minimum
//! 4. read Energy/Protein/Carbohydrate/Fat by exact nutrient name and unit
//! 5. accept only records where all four are strictly positive

use super::fuzzy;
use crate::config::LookupConfig;
use crate::constants::usda;
use crate::external::{FoodDataSource, FoodSearchResult};
use crate::logging::AppLogger;
use crate::models::NutritionVector;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Accepted database match for a dish name
#[derive(Debug, Clone, PartialEq)]
pub struct FoodMatch {
    /// `FoodData` Central ID of the matched record
    pub fdc_id: u64,
    /// Description of the matched record
    pub description: String,
    /// Fuzzy score (0-100)
    pub score: u8,
    /// Nutrition per 100 g
    pub per_100g: NutritionVector,
}

/// Dish-name to nutrition resolver
#[derive(Clone)]
pub struct NutritionLookup {
    source: Option<Arc<dyn FoodDataSource>>,
    config: LookupConfig,
}

impl NutritionLookup {
    /// Lookup backed by a food data source
    #[must_use]
    pub fn new(source: Arc<dyn FoodDataSource>, config: LookupConfig) -> Self {
        Self {
            source: Some(source),
            config,
        }
    }

    /// Lookup that always misses (no database key configured)
    #[must_use]
    pub fn disabled(config: LookupConfig) -> Self {
        info!("Nutrition database lookups disabled; figures stay model estimates");
        Self {
            source: None,
            config,
        }
    }

    /// Enabled when a source is given, disabled otherwise
    #[must_use]
    pub fn from_source(source: Option<Arc<dyn FoodDataSource>>, config: LookupConfig) -> Self {
        match source {
            Some(source) => Self::new(source, config),
            None => Self::disabled(config),
        }
    }

    /// Whether a database is attached
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Lookup tuning in use
    #[must_use]
    pub const fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Per-100 g nutrition for a dish name, or `None` on any miss
    pub async fn lookup(&self, dish_name: &str) -> Option<NutritionVector> {
        self.find_match(dish_name).await.map(|found| found.per_100g)
    }

    /// Best accepted database match for a dish name
    #[instrument(skip(self), fields(dish = %dish_name))]
    pub async fn find_match(&self, dish_name: &str) -> Option<FoodMatch> {
        let source = self.source.as_ref()?;
        let query = dish_name.trim();
        if query.is_empty() {
            return None;
        }

        let candidates = match source
            .search_foods(query, self.config.page_size, &self.config.data_types)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Nutrition lookup failed");
                return None;
            }
        };

        let Some((best, score)) = select_best_match(query, &candidates, self.config.min_match_score)
        else {
            AppLogger::log_lookup(query, None, None);
            return None;
        };

        let per_100g = nutrition_per_100g(best);
        if !per_100g.is_complete() {
            debug!(
                description = %best.description,
                "Matched record has incomplete macros, ignoring"
            );
            AppLogger::log_lookup(query, None, Some(score));
            return None;
        }

        AppLogger::log_lookup(query, Some(&best.description), Some(score));
        Some(FoodMatch {
            fdc_id: best.fdc_id,
            description: best.description.clone(),
            score,
            per_100g,
        })
    }
}

impl fmt::Debug for NutritionLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NutritionLookup")
            .field("enabled", &self.is_enabled())
            .field("config", &self.config)
            .finish()
    }
}

/// Highest-scoring candidate at or above `min_score`
///
/// Ties keep the earliest candidate.
#[must_use]
pub fn select_best_match<'a>(
    query: &str,
    candidates: &'a [FoodSearchResult],
    min_score: u8,
) -> Option<(&'a FoodSearchResult, u8)> {
    let query = query.to_lowercase();
    let mut best: Option<(&FoodSearchResult, u8)> = None;

    for candidate in candidates {
        let score = fuzzy::ratio(&query, &candidate.description.to_lowercase());
        let improves = match best {
            Some((_, top)) => score > top,
            None => true,
        };
        if improves {
            best = Some((candidate, score));
        }
    }

    best.filter(|(_, score)| *score >= min_score)
}

/// Energy, protein, carbohydrate and fat of a search result (0 when missing)
#[must_use]
pub fn nutrition_per_100g(food: &FoodSearchResult) -> NutritionVector {
    NutritionVector::new(
        food.nutrient_amount(usda::NUTRIENT_ENERGY, usda::UNIT_KCAL),
        food.nutrient_amount(usda::NUTRIENT_PROTEIN, usda::UNIT_GRAM),
        food.nutrient_amount(usda::NUTRIENT_CARBS, usda::UNIT_GRAM),
        food.nutrient_amount(usda::NUTRIENT_FAT, usda::UNIT_GRAM),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u64, description: &str) -> FoodSearchResult {
        FoodSearchResult::new(id, description, usda::DATA_TYPE_SURVEY)
    }

    #[test]
    fn test_select_best_match_prefers_highest_score() {
        let candidates = vec![
            candidate(1, "Chicken soup"),
            candidate(2, "Chicken breast, baked"),
            candidate(3, "Chicken breast"),
        ];
        let (best, score) = select_best_match("Grilled Chicken Breast", &candidates, 65).unwrap();
        assert_eq!(best.fdc_id, 3);
        assert_eq!(score, 78);
    }

    #[test]
    fn test_select_best_match_ties_keep_first() {
        let candidates = vec![candidate(1, "Oatmeal"), candidate(2, "oatmeal")];
        let (best, score) = select_best_match("oatmeal", &candidates, 65).unwrap();
        assert_eq!(best.fdc_id, 1);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_select_best_match_enforces_threshold() {
        let candidates = vec![candidate(1, "Beef stew with potatoes")];
        assert!(select_best_match("Quinoa salad", &candidates, 65).is_none());
        assert!(select_best_match("Quinoa salad", &[], 0).is_none());
    }

    #[test]
    fn test_nutrition_per_100g_reads_exact_names() {
        let food = candidate(1, "Oatmeal, cooked")
            .with_macros(71.0, 2.5, 12.0, 1.5)
            .with_nutrient("Energy", "kJ", 297.0);
        let nutrition = nutrition_per_100g(&food);
        assert_eq!(nutrition, NutritionVector::new(71.0, 2.5, 12.0, 1.5));
    }
}
