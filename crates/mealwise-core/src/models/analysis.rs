// ABOUTME: Grocery list and food photo analysis result types
// ABOUTME: Lenient deserialization of vision output with database enrichment fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::meal_plan::lenient_number;
use super::nutrition::NutritionVector;
use crate::constants::defaults;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Consolidated shopping list produced for a set of dishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryList {
    /// Deduplicated, sorted dish names the list was built from
    pub dishes: Vec<String>,
    /// Markdown body (category headings with bullet items)
    pub markdown: String,
}

/// Where the nutrition figures of an analysis come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutritionSource {
    /// Only the vision model's guess is available
    #[default]
    ModelEstimate,
    /// Verified against the nutrition database
    Database,
}

/// Macros estimated by the vision model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatedMacros {
    /// Protein (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub protein: f64,
    /// Carbohydrates (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbs: f64,
    /// Fat (g)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat: f64,
}

/// Structured guess about a photographed dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodImageAnalysis {
    /// Food label in the requested language
    #[serde(default, deserialize_with = "non_blank_string")]
    pub food: Option<String>,
    /// Estimated calories for the visible portion
    #[serde(default, deserialize_with = "lenient_f64")]
    pub estimated_calories: f64,
    /// Estimated macros for the visible portion
    #[serde(default, deserialize_with = "lenient_macros")]
    pub macros: EstimatedMacros,
    /// Estimated portion weight
    #[serde(default = "default_portion", deserialize_with = "lenient_portion")]
    pub portion_grams: f64,
    /// Database nutrition scaled to the portion, when a match was found
    #[serde(default, skip_deserializing)]
    pub verified_nutrition: Option<NutritionVector>,
    /// Provenance of the figures
    #[serde(default, skip_deserializing)]
    pub data_source: NutritionSource,
}

impl FoodImageAnalysis {
    /// The model's estimate as a nutrition vector
    #[must_use]
    pub const fn estimated_nutrition(&self) -> NutritionVector {
        NutritionVector::new(
            self.estimated_calories,
            self.macros.protein,
            self.macros.carbs,
            self.macros.fat,
        )
    }

    /// Best available figures: verified when present, otherwise the estimate
    #[must_use]
    pub fn effective_nutrition(&self) -> NutritionVector {
        self.verified_nutrition
            .unwrap_or_else(|| self.estimated_nutrition())
    }
}

const fn default_portion() -> f64 {
    defaults::PORTION_GRAMS
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).unwrap_or(0.0))
}

fn lenient_portion<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value)
        .filter(|grams| *grams > 0.0)
        .unwrap_or(defaults::PORTION_GRAMS))
}

fn lenient_macros<'de, D>(deserializer: D) -> Result<EstimatedMacros, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_object() {
        serde_json::from_value(value).map_err(serde::de::Error::custom)
    } else {
        Ok(EstimatedMacros::default())
    }
}

fn non_blank_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_analysis_deserialization() {
        let analysis: FoodImageAnalysis = serde_json::from_value(json!({
            "food": "Margherita pizza",
            "estimated_calories": "850 kcal",
            "macros": {"protein": 34, "carbs": "98g"},
            "portion_grams": null
        }))
        .unwrap();

        assert_eq!(analysis.food.as_deref(), Some("Margherita pizza"));
        assert!((analysis.estimated_calories - 850.0).abs() < f64::EPSILON);
        assert!((analysis.macros.carbs - 98.0).abs() < f64::EPSILON);
        assert!(analysis.macros.fat.abs() < f64::EPSILON);
        assert!((analysis.portion_grams - 100.0).abs() < f64::EPSILON);
        assert_eq!(analysis.data_source, NutritionSource::ModelEstimate);
    }

    #[test]
    fn test_missing_fields_default() {
        let analysis: FoodImageAnalysis = serde_json::from_value(json!({})).unwrap();
        assert!(analysis.food.is_none());
        assert!((analysis.portion_grams - 100.0).abs() < f64::EPSILON);
        assert_eq!(analysis.effective_nutrition(), NutritionVector::default());
    }
}
