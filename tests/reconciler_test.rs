// ABOUTME: Integration tests for reconciling generated meal plans with database references
// ABOUTME: Verification counts, per-portion scaling, deduplicated lookups and failure tolerance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{day, dish, sample_plan};
use mealwise::config::{LookupConfig, ReconciliationConfig};
use mealwise::constants::usda;
use mealwise::errors::AppError;
use mealwise::external::{FoodDataSource, FoodSearchResult, MockUsdaClient};
use mealwise::intelligence::{NutritionLookup, NutritionReconciler};
use mealwise::models::{Macro, MealPlan, MealSlot};
use std::sync::Arc;

fn reconciler_over(
    client: MockUsdaClient,
    config: ReconciliationConfig,
) -> (NutritionReconciler, Arc<MockUsdaClient>) {
    common::init_test_logging();
    let client = Arc::new(client);
    let source: Arc<dyn FoodDataSource> = client.clone();
    let lookup = NutritionLookup::new(source, LookupConfig::default());
    (NutritionReconciler::new(lookup, config), client)
}

fn scaled_to_portion() -> ReconciliationConfig {
    ReconciliationConfig {
        scale_reference_to_portion: true,
        ..ReconciliationConfig::default()
    }
}

/// Database holding a single 400 kcal/100 g chicken record
fn chicken_database() -> MockUsdaClient {
    MockUsdaClient::with_foods(vec![FoodSearchResult::new(
        1,
        "Chicken breast, baked or broiled",
        usda::DATA_TYPE_SURVEY,
    )
    .with_macros(400.0, 30.0, 10.0, 20.0)])
}

fn chicken_plan(calories: f64) -> MealPlan {
    MealPlan {
        days: vec![day(
            "day1",
            vec![(
                MealSlot::Dinner,
                dish(
                    "Chicken breast, baked or broiled",
                    150.0,
                    (calories, 30.0, 10.0, 20.0),
                ),
            )],
        )],
    }
}

#[tokio::test]
async fn test_reference_is_compared_unscaled_by_default() {
    let (reconciler, _) = reconciler_over(chicken_database(), ReconciliationConfig::default());
    assert!(!reconciler.config().scale_reference_to_portion);

    // 430 vs 400 is +7.5%, inside tolerance even though the portion is 150 g
    let report = reconciler.reconcile(&chicken_plan(430.0)).await;
    assert_eq!(report.verified_dishes, 1);
    assert!(report.is_consistent());

    // 500 vs 400 is +25%
    let report = reconciler.reconcile(&chicken_plan(500.0)).await;
    assert_eq!(report.discrepancies.len(), 1);
    let macros = &report.discrepancies[0].macros;
    assert_eq!(macros.len(), 1);
    assert_eq!(macros[0].nutrient, Macro::Calories);
    assert!((macros[0].reference - 400.0).abs() < 1e-9);
    assert!((macros[0].variance_percent - 25.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_reconcile_sample_plan_scaled_to_portion() {
    let (reconciler, client) = reconciler_over(MockUsdaClient::new(), scaled_to_portion());
    let report = reconciler.reconcile(&sample_plan()).await;

    // Oatmeal twice, chicken, apple verified; the stew has no match
    assert_eq!(report.total_dishes, 5);
    assert_eq!(report.verified_dishes, 4);
    // Four distinct names, each looked up once
    assert_eq!(client.call_count(), 4);

    // Only the chicken lunch overstates energy (400 vs 247.5 kcal for 150 g)
    assert_eq!(report.discrepancies.len(), 1);
    let flagged = &report.discrepancies[0];
    assert_eq!(flagged.dish, "Chicken breast, baked or broiled");
    assert_eq!(flagged.day, "day1");
    assert_eq!(flagged.slot, MealSlot::Lunch);
    assert_eq!(flagged.macros.len(), 1);
    assert_eq!(flagged.macros[0].nutrient, Macro::Calories);
    assert!((flagged.macros[0].reference - 247.5).abs() < 1e-9);
    assert!((flagged.macros[0].variance_percent - 61.6).abs() < 1e-9);
    assert!(!report.is_consistent());
}

#[tokio::test]
async fn test_reconcile_sample_plan_unscaled() {
    let (reconciler, _) = reconciler_over(MockUsdaClient::new(), ReconciliationConfig::default());
    let report = reconciler.reconcile(&sample_plan()).await;

    // Every verified dish has a portion above 100 g, so each one is flagged
    assert_eq!(report.verified_dishes, 4);
    let flagged: Vec<&str> = report
        .discrepancies
        .iter()
        .map(|d| d.dish.as_str())
        .collect();
    assert_eq!(
        flagged,
        vec![
            "Oatmeal, cooked",
            "Chicken breast, baked or broiled",
            "Oatmeal, cooked",
            "Apple, raw",
        ]
    );
    // Oatmeal at 200 g reports twice the per-100 g energy
    assert!((report.discrepancies[0].macros[0].variance_percent - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_reconcile_flags_every_deviating_macro() {
    let (reconciler, _) = reconciler_over(MockUsdaClient::new(), scaled_to_portion());
    let plan = MealPlan {
        days: vec![day(
            "day3",
            vec![(
                MealSlot::Dinner,
                // Reference for 200 g: 224 kcal, 4.6 P, 47 C, 1.6 F
                dish("Rice, brown, cooked", 200.0, (224.0, 9.0, 47.0, 0.5)),
            )],
        )],
    };

    let report = reconciler.reconcile(&plan).await;
    let macros: Vec<Macro> = report.discrepancies[0]
        .macros
        .iter()
        .map(|m| m.nutrient)
        .collect();
    assert_eq!(macros, vec![Macro::Protein, Macro::Fat]);
}

#[tokio::test]
async fn test_reconcile_lookup_failures_only_reduce_verified_count() {
    let (reconciler, client) = reconciler_over(
        MockUsdaClient::failing(AppError::internal("boom")),
        ReconciliationConfig::default(),
    );
    let report = reconciler.reconcile(&sample_plan()).await;

    assert_eq!(report.total_dishes, 5);
    assert_eq!(report.verified_dishes, 0);
    assert!(report.discrepancies.is_empty());
    assert!(report.verification_rate().abs() < f64::EPSILON);
    assert_eq!(client.call_count(), 4);
}

#[tokio::test]
async fn test_reconcile_disabled_lookup() {
    common::init_test_logging();
    let reconciler = NutritionReconciler::new(
        NutritionLookup::disabled(LookupConfig::default()),
        ReconciliationConfig::default(),
    );
    let report = reconciler.reconcile(&sample_plan()).await;
    assert_eq!(report.total_dishes, 5);
    assert_eq!(report.verified_dishes, 0);
}

#[tokio::test]
async fn test_reconcile_empty_plan() {
    let (reconciler, client) =
        reconciler_over(MockUsdaClient::new(), ReconciliationConfig::default());
    let report = reconciler.reconcile(&MealPlan::default()).await;
    assert_eq!(report.total_dishes, 0);
    assert!(report.is_consistent());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_reconcile_sequential_matches_concurrent() {
    let sequential = ReconciliationConfig {
        max_concurrent_lookups: 1,
        ..ReconciliationConfig::default()
    };
    let (one_at_a_time, _) = reconciler_over(MockUsdaClient::new(), sequential);
    let (concurrent, _) = reconciler_over(MockUsdaClient::new(), ReconciliationConfig::default());

    let plan = sample_plan();
    assert_eq!(
        one_at_a_time.reconcile(&plan).await,
        concurrent.reconcile(&plan).await
    );
}
