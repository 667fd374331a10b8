// ABOUTME: Integration tests for dish-name nutrition lookup against a mock food database
// ABOUTME: Fuzzy acceptance threshold, tie-breaking, incomplete records and failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use mealwise::config::LookupConfig;
use mealwise::constants::usda;
use mealwise::errors::{AppError, ErrorCode};
use mealwise::external::{FoodDataSource, FoodSearchResult, MockUsdaClient};
use mealwise::intelligence::{fuzzy, nutrition_per_100g, select_best_match, NutritionLookup};
use std::sync::Arc;

fn lookup_over(client: MockUsdaClient) -> (NutritionLookup, Arc<MockUsdaClient>) {
    common::init_test_logging();
    let client = Arc::new(client);
    let source: Arc<dyn FoodDataSource> = client.clone();
    (NutritionLookup::new(source, LookupConfig::default()), client)
}

fn survey_food(id: u64, description: &str) -> FoodSearchResult {
    FoodSearchResult::new(id, description, usda::DATA_TYPE_SURVEY)
}

// =============================================================================
// Fuzzy Ratio
// =============================================================================

#[test]
fn test_ratio_properties() {
    assert_eq!(fuzzy::ratio("", ""), 100);
    assert_eq!(fuzzy::ratio("abc", ""), 0);
    assert_eq!(fuzzy::ratio("oatmeal", "oatmeal"), 100);
    assert_eq!(
        fuzzy::ratio("lentil soup", "soup, lentil"),
        fuzzy::ratio("soup, lentil", "lentil soup")
    );
}

#[test]
fn test_ratio_threshold_boundary() {
    // 2 * 7 / (7 + 15) = 0.636 -> 64, just below the default threshold
    assert_eq!(fuzzy::ratio("oatmeal", "oatmeal, cooked"), 64);
    // 2 * 14 / (14 + 15) = 0.966 -> 97
    assert_eq!(fuzzy::ratio("oatmeal cooked", "oatmeal, cooked"), 97);
}

// =============================================================================
// Candidate Selection
// =============================================================================

#[test]
fn test_select_best_match_below_threshold() {
    let candidates = vec![survey_food(1, "Oatmeal, cooked")];
    assert!(select_best_match("Oatmeal", &candidates, 65).is_none());
    let (best, score) = select_best_match("Oatmeal", &candidates, 60).unwrap();
    assert_eq!(best.fdc_id, 1);
    assert_eq!(score, 64);
}

#[test]
fn test_select_best_match_first_wins_ties() {
    let candidates = vec![survey_food(10, "Apple, raw"), survey_food(11, "Apple, raw")];
    let (best, score) = select_best_match("apple, raw", &candidates, 65).unwrap();
    assert_eq!(best.fdc_id, 10);
    assert_eq!(score, 100);
}

#[test]
fn test_select_best_match_is_case_insensitive() {
    let candidates = vec![survey_food(1, "RICE, BROWN, COOKED")];
    let (_, score) = select_best_match("rice, brown, cooked", &candidates, 65).unwrap();
    assert_eq!(score, 100);
}

#[test]
fn test_nutrition_per_100g_reads_units_and_defaults_missing() {
    let food = survey_food(1, "Broth")
        .with_nutrient(usda::NUTRIENT_ENERGY, "kcal", 12.0)
        .with_nutrient(usda::NUTRIENT_PROTEIN, usda::UNIT_GRAM, 1.5)
        // Energy reported in kJ is not read as kcal
        .with_nutrient(usda::NUTRIENT_ENERGY, "kJ", 50.0);
    let per_100g = nutrition_per_100g(&food);
    assert!((per_100g.calories - 12.0).abs() < f64::EPSILON);
    assert!((per_100g.protein - 1.5).abs() < f64::EPSILON);
    assert!(per_100g.carbs.abs() < f64::EPSILON);
    assert!(!per_100g.is_complete());
}

// =============================================================================
// Lookup
// =============================================================================

#[tokio::test]
async fn test_lookup_exact_description() {
    let (lookup, client) = lookup_over(MockUsdaClient::new());
    let found = lookup
        .find_match("Chicken breast, baked or broiled")
        .await
        .unwrap();
    assert_eq!(found.fdc_id, 2_705_964);
    assert_eq!(found.score, 100);
    assert!((found.per_100g.calories - 165.0).abs() < f64::EPSILON);
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_lookup_rejects_weak_match() {
    let (lookup, client) = lookup_over(MockUsdaClient::new());
    // Shares "chicken" with a record but scores far below the threshold
    assert!(lookup.lookup("Chicken tikka masala").await.is_none());
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_lookup_ignores_record_with_zero_macro() {
    // Salmon carries 0 g carbohydrate, so it is not accepted as a reference
    let (lookup, _) = lookup_over(MockUsdaClient::new());
    assert!(lookup.lookup("Salmon, baked or broiled").await.is_none());
}

#[tokio::test]
async fn test_lookup_blank_name_makes_no_request() {
    let (lookup, client) = lookup_over(MockUsdaClient::new());
    assert!(lookup.lookup("   ").await.is_none());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_lookup_failure_is_a_miss() {
    let (lookup, client) = lookup_over(MockUsdaClient::failing(AppError::new(
        ErrorCode::ExternalRateLimited,
        "slow down",
    )));
    assert!(lookup.lookup("Apple, raw").await.is_none());
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_lookup_honours_dataset_filter() {
    let foods = vec![
        FoodSearchResult::new(1, "Apple, raw", "Foundation").with_macros(52.0, 0.3, 13.8, 0.2),
    ];
    let (lookup, _) = lookup_over(MockUsdaClient::with_foods(foods));
    // Default filter only searches the survey dataset
    assert!(lookup.lookup("Apple, raw").await.is_none());
}

#[tokio::test]
async fn test_disabled_lookup_always_misses() {
    common::init_test_logging();
    let lookup = NutritionLookup::disabled(LookupConfig::default());
    assert!(!lookup.is_enabled());
    assert!(lookup.lookup("Apple, raw").await.is_none());
}

#[tokio::test]
async fn test_mock_search_validates_arguments() {
    let client = MockUsdaClient::new();
    let err = client.search_foods("  ", 3, &[]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    let err = client.search_foods("apple", 0, &[]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_mock_search_respects_page_size() {
    let client = MockUsdaClient::new();
    // "cooked" appears in oatmeal and brown rice; "baked" in chicken and salmon
    let results = client
        .search_foods("baked cooked", 3, &[usda::DATA_TYPE_SURVEY.to_owned()])
        .await
        .unwrap();
    assert_eq!(results.len(), 3);
}
