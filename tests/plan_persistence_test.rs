// ABOUTME: Integration tests for saving meal plans to disk and loading them back
// ABOUTME: Wrapped documents, bare day maps and rejection of unusable files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::sample_plan;
use mealwise::errors::ErrorCode;
use mealwise::models::{MealPlan, MealSlot, MEAL_PLAN_KEY};
use serde_json::{json, Value};
use tempfile::TempDir;

async fn write_json(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    tokio::fs::write(&path, serde_json::to_vec_pretty(value).unwrap())
        .await
        .unwrap();
    path
}

async fn read_plan(path: &std::path::Path) -> mealwise::errors::AppResult<MealPlan> {
    let bytes = tokio::fs::read(path).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes)?;
    MealPlan::from_document(&value)
}

#[tokio::test]
async fn test_saved_plan_loads_identically() {
    let dir = TempDir::new().unwrap();
    let plan = sample_plan();
    let path = write_json(&dir, "plan.json", &plan.to_document()).await;

    let loaded = read_plan(&path).await.unwrap();
    assert_eq!(loaded, plan);
    assert_eq!(loaded.weekly_summary(), plan.weekly_summary());
}

#[tokio::test]
async fn test_document_shape() {
    let document = sample_plan().to_document();
    let days = document[MEAL_PLAN_KEY].as_object().unwrap();
    assert_eq!(days.keys().collect::<Vec<_>>(), vec!["day1", "day2"]);
    // Slots are always written as arrays, empty slots are omitted
    assert!(document[MEAL_PLAN_KEY]["day1"]["breakfast"].is_array());
    assert!(document[MEAL_PLAN_KEY]["day2"].get("lunch").is_none());
}

#[tokio::test]
async fn test_bare_day_map_is_accepted() {
    let dir = TempDir::new().unwrap();
    let path = write_json(
        &dir,
        "bare.json",
        &json!({
            "day1": {"snacks": {"dish_name": "Apple, raw", "portion_grams": 150}}
        }),
    )
    .await;

    let plan = read_plan(&path).await.unwrap();
    assert_eq!(plan.len(), 1);
    assert_eq!(
        plan.days[0].dishes(MealSlot::Snacks)[0].name(),
        Some("Apple, raw")
    );
}

#[tokio::test]
async fn test_non_object_document_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "list.json", &json!(["day1", "day2"])).await;
    let err = read_plan(&path).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ParseFailed);
}

#[tokio::test]
async fn test_corrupt_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, b"{\"meal_plan\": ").await.unwrap();
    let err = read_plan(&path).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);
}
