// ABOUTME: Integration tests for recovering JSON objects from free-form model output
// ABOUTME: Fenced blocks, strict and lenient modes, error classes and typed extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealwise::errors::{AppError, ErrorCode};
use mealwise::extraction::{
    extract_json, extract_json_as, fenced_block, strip_fence, ExtractionError, ExtractionMode,
};
use mealwise::models::FoodImageAnalysis;
use serde_json::json;

// =============================================================================
// Fenced Blocks
// =============================================================================

#[test]
fn test_fenced_json_wins_over_surrounding_prose() {
    let text = "Here is your plan {not this}:\n```json\n{\"meal_plan\": {\"day1\": {}}}\n```\nThanks!";
    for mode in [ExtractionMode::Strict, ExtractionMode::Lenient] {
        let value = extract_json(text, mode).unwrap();
        assert_eq!(value, json!({"meal_plan": {"day1": {}}}));
    }
}

#[test]
fn test_fenced_block_without_object_falls_through() {
    // The fence holds an array, so the strict whole-text rule applies and fails
    let text = "```json\n[1, 2, 3]\n```";
    let err = extract_json(text, ExtractionMode::Strict).unwrap_err();
    assert!(matches!(err, ExtractionError::NotFound));
}

#[test]
fn test_untagged_fence_is_not_a_json_block() {
    let text = "```\n{\"a\": 1}\n```";
    assert_eq!(fenced_block(text, "json"), None);
    // Lenient mode still finds the object inside the fence
    assert_eq!(
        extract_json(text, ExtractionMode::Lenient).unwrap(),
        json!({"a": 1})
    );
}

#[test]
fn test_strip_fence_variants() {
    assert_eq!(strip_fence("```markdown\n### Produce\n* Apples\n```"), "### Produce\n* Apples");
    assert_eq!(strip_fence("  ### Dairy\n* Milk  \n"), "### Dairy\n* Milk");
    assert_eq!(strip_fence("```\n```"), "");
}

// =============================================================================
// Strict vs Lenient
// =============================================================================

#[test]
fn test_strict_mode_accepts_bare_object() {
    let value = extract_json("\n  {\"food\": \"Apple\"}  \n", ExtractionMode::Strict).unwrap();
    assert_eq!(value["food"], "Apple");
}

#[test]
fn test_strict_mode_rejects_prose_wrapped_object() {
    let err = extract_json("Sure! {\"food\": \"Apple\"} Enjoy.", ExtractionMode::Strict)
        .unwrap_err();
    assert!(matches!(err, ExtractionError::NotFound));
    assert_eq!(err.code(), ErrorCode::ExtractionFailed);
}

#[test]
fn test_lenient_mode_finds_first_balanced_object() {
    let text = r#"I think this is: {"food": "Pizza {margherita}", "macros": {"fat": 10}} and {"other": 1}"#;
    let value = extract_json(text, ExtractionMode::Lenient).unwrap();
    assert_eq!(value["food"], "Pizza {margherita}");
    assert_eq!(value["macros"]["fat"], 10);
    assert!(value.get("other").is_none());
}

#[test]
fn test_no_object_at_all() {
    for mode in [ExtractionMode::Strict, ExtractionMode::Lenient] {
        let err = extract_json("I could not identify any food.", mode).unwrap_err();
        assert!(matches!(err, ExtractionError::NotFound));
    }
}

// =============================================================================
// Error Mapping
// =============================================================================

#[test]
fn test_malformed_candidate_is_parse_failed_with_snippet() {
    let text = "{\"food\": \"Apple\", \"estimated_calories\": }";
    let err = extract_json(text, ExtractionMode::Strict).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ParseFailed);

    let app_error: AppError = err.into();
    assert_eq!(app_error.code, ErrorCode::ParseFailed);
    assert!(app_error.details["snippet"]
        .as_str()
        .unwrap()
        .starts_with("{\"food\""));
}

#[test]
fn test_snippet_is_bounded() {
    let long_value = "x".repeat(1000);
    let text = format!("{{\"food\": \"{long_value}\",}}");
    let app_error: AppError = extract_json(&text, ExtractionMode::Lenient)
        .unwrap_err()
        .into();
    assert_eq!(
        app_error.details["snippet"].as_str().unwrap().chars().count(),
        200
    );
}

#[test]
fn test_not_found_maps_to_extraction_failed() {
    let app_error: AppError = ExtractionError::NotFound.into();
    assert_eq!(app_error.code, ErrorCode::ExtractionFailed);
    assert!(app_error.details.is_null());
}

// =============================================================================
// Typed Extraction
// =============================================================================

#[test]
fn test_extract_food_analysis_leniently() {
    let text = r#"Analysis: {"food": "Margherita pizza", "estimated_calories": "850 kcal",
        "macros": {"protein": 35, "carbs": "98g", "fat": 32}, "portion_grams": 0}"#;
    let analysis: FoodImageAnalysis = extract_json_as(text, ExtractionMode::Lenient).unwrap();

    assert_eq!(analysis.food.as_deref(), Some("Margherita pizza"));
    assert!((analysis.estimated_calories - 850.0).abs() < f64::EPSILON);
    assert!((analysis.macros.carbs - 98.0).abs() < f64::EPSILON);
    // Non-positive portions fall back to 100 g
    assert!((analysis.portion_grams - 100.0).abs() < f64::EPSILON);
    assert!(analysis.verified_nutrition.is_none());
}

#[test]
fn test_extract_as_reports_shape_mismatch() {
    let err = extract_json_as::<Vec<String>>("{\"a\": 1}", ExtractionMode::Strict).unwrap_err();
    assert!(matches!(err, ExtractionError::Mismatch { .. }));

    let app_error: AppError = err.into();
    assert_eq!(app_error.code, ErrorCode::ParseFailed);
    assert!(app_error.details["expected"].as_str().unwrap().starts_with("Vec"));
}

#[test]
fn test_default_mode_is_lenient() {
    assert_eq!(ExtractionMode::default(), ExtractionMode::Lenient);
}
