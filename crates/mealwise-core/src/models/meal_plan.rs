// ABOUTME: Meal plan model ingested from the generative model's loose JSON
// ABOUTME: Day ordinal parsing, stable day ordering, slot normalization and daily totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::{Macro, NutritionVector};
use crate::constants::{defaults, meal_slots};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Key wrapping the day map in model responses and saved plan files
pub const MEAL_PLAN_KEY: &str = "meal_plan";

/// The four canonical meal slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// Morning meal
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// One or more snacks
    Snacks,
}

impl MealSlot {
    /// Canonical walk order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    /// JSON key for this slot
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => meal_slots::BREAKFAST,
            Self::Lunch => meal_slots::LUNCH,
            Self::Dinner => meal_slots::DINNER,
            Self::Snacks => meal_slots::SNACKS,
        }
    }

    /// Resolve a JSON key to a slot (exact, lowercase keys only)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == key)
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish inside a meal slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishEntry {
    /// Dish label; `None` when missing or blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_name: Option<String>,
    /// Portion size in grams
    #[serde(default = "default_portion")]
    pub portion_grams: f64,
    /// Model-estimated nutrition for the whole portion
    #[serde(default)]
    pub nutrition: NutritionVector,
    /// Free-text provenance reported by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

const fn default_portion() -> f64 {
    defaults::PORTION_GRAMS
}

impl DishEntry {
    /// Build an entry from a named dish
    #[must_use]
    pub fn named(name: impl Into<String>, portion_grams: f64, nutrition: NutritionVector) -> Self {
        Self {
            dish_name: Some(name.into()),
            portion_grams,
            nutrition,
            data_source: None,
        }
    }

    /// Leniently read a dish object
    ///
    /// Returns `None` for non-object values. Numeric fields accept numbers or
    /// strings that start with a number (`"300 kcal"`); anything else is 0.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let dish_name = object
            .get("dish_name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned);

        let portion_grams = object
            .get("portion_grams")
            .and_then(lenient_number)
            .filter(|grams| *grams > 0.0)
            .unwrap_or(defaults::PORTION_GRAMS);

        let nutrition = object
            .get("nutrition")
            .and_then(Value::as_object)
            .map(nutrition_from_object)
            .unwrap_or_default();

        let data_source = object
            .get("data_source")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);

        Some(Self {
            dish_name,
            portion_grams,
            nutrition,
            data_source,
        })
    }

    /// Dish name when present
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.dish_name.as_deref()
    }
}

fn nutrition_from_object(object: &Map<String, Value>) -> NutritionVector {
    let read = |nutrient: Macro| {
        object
            .get(nutrient.as_str())
            .and_then(lenient_number)
            .unwrap_or(0.0)
    };
    NutritionVector::new(
        read(Macro::Calories),
        read(Macro::Protein),
        read(Macro::Carbs),
        read(Macro::Fat),
    )
}

/// Read a JSON number, or the leading number of a string such as `"12.5 g"`
#[must_use]
pub fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => leading_number(text),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(index, ch)| !(ch.is_ascii_digit() || *ch == '.' || (*index == 0 && *ch == '-')))
        .map_or(trimmed.len(), |(index, _)| index);
    trimmed[..end].parse().ok()
}

/// Ordinal of a day key: first run of ASCII digits, 0 when none (or on overflow)
#[must_use]
pub fn day_ordinal(label: &str) -> u32 {
    let digits: String = label
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// One day of the plan
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayPlan {
    /// Ordinal parsed from the label
    pub ordinal: u32,
    /// Original day key (`"day1"`, `"Day 2"`, ...)
    pub label: String,
    /// Breakfast dishes
    pub breakfast: Vec<DishEntry>,
    /// Lunch dishes
    pub lunch: Vec<DishEntry>,
    /// Dinner dishes
    pub dinner: Vec<DishEntry>,
    /// Snack dishes
    pub snacks: Vec<DishEntry>,
}

impl DayPlan {
    /// Empty day with a label; the ordinal is derived from it
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            ordinal: day_ordinal(&label),
            label,
            ..Self::default()
        }
    }

    /// Dishes in one slot
    #[must_use]
    pub fn dishes(&self, slot: MealSlot) -> &[DishEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    /// Mutable access to one slot
    pub fn dishes_mut(&mut self, slot: MealSlot) -> &mut Vec<DishEntry> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Every dish in canonical slot order
    pub fn iter_dishes(&self) -> impl Iterator<Item = (MealSlot, &DishEntry)> {
        MealSlot::ALL
            .into_iter()
            .flat_map(move |slot| self.dishes(slot).iter().map(move |dish| (slot, dish)))
    }

    /// Dishes that carry a name
    pub fn named_dishes(&self) -> impl Iterator<Item = (MealSlot, &DishEntry)> {
        self.iter_dishes().filter(|(_, dish)| dish.dish_name.is_some())
    }

    /// Sum of the model-estimated nutrition over named dishes
    #[must_use]
    pub fn totals(&self) -> NutritionVector {
        self.named_dishes().map(|(_, dish)| dish.nutrition).sum()
    }

    fn from_value(label: &str, value: &Value) -> Option<Self> {
        let Some(object) = value.as_object() else {
            debug!(day = %label, "Skipping day entry that is not an object");
            return None;
        };

        let mut day = Self::new(label);
        for (key, slot_value) in object {
            let Some(slot) = MealSlot::from_key(key) else {
                debug!(day = %label, slot = %key, "Ignoring unknown meal slot");
                continue;
            };
            let entries: Vec<DishEntry> = match slot_value {
                Value::Array(items) => items.iter().filter_map(DishEntry::from_value).collect(),
                other => DishEntry::from_value(other).into_iter().collect(),
            };
            day.dishes_mut(slot).extend(entries);
        }
        Some(day)
    }

    fn to_value(&self) -> Value {
        let mut object = Map::new();
        for slot in MealSlot::ALL {
            let dishes = self.dishes(slot);
            if dishes.is_empty() {
                continue;
            }
            let items = dishes
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()
                .unwrap_or_default();
            object.insert(slot.as_str().to_owned(), Value::Array(items));
        }
        Value::Object(object)
    }
}

/// Per-day nutrition totals in plan order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    /// Day label
    pub label: String,
    /// Summed nutrition of named dishes
    pub totals: NutritionVector,
}

/// A multi-day meal plan, ordered by day ordinal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MealPlan {
    /// Days in ascending ordinal order (ties keep encounter order)
    pub days: Vec<DayPlan>,
}

impl MealPlan {
    /// Ingest a day map (`{"day1": {...}, ...}`)
    ///
    /// # Errors
    ///
    /// Returns `ParseFailed` when `value` is not a JSON object.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| AppError::parse_failed("Meal plan must be a JSON object of days"))?;

        let mut days: Vec<DayPlan> = object
            .iter()
            .filter_map(|(label, day)| DayPlan::from_value(label, day))
            .collect();
        days.sort_by_key(|day| day.ordinal);

        Ok(Self { days })
    }

    /// Ingest a document that is either `{"meal_plan": {...}}` or a bare day map
    ///
    /// # Errors
    ///
    /// Returns `ParseFailed` when the plan is not a JSON object.
    pub fn from_document(value: &Value) -> AppResult<Self> {
        match value.get(MEAL_PLAN_KEY) {
            Some(inner) if inner.is_object() => Self::from_value(inner),
            _ => Self::from_value(value),
        }
    }

    /// Serialize back into the wire shape `{label: {slot: [dish, ...]}}`
    #[must_use]
    pub fn to_value(&self) -> Value {
        let days = self
            .days
            .iter()
            .map(|day| (day.label.clone(), day.to_value()))
            .collect::<Map<_, _>>();
        Value::Object(days)
    }

    /// Wrapped document suitable for saving and later `from_document`
    #[must_use]
    pub fn to_document(&self) -> Value {
        let mut root = Map::new();
        root.insert(MEAL_PLAN_KEY.to_owned(), self.to_value());
        Value::Object(root)
    }

    /// True when the plan holds no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of days
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Every named dish with its day label and slot, in walk order
    pub fn named_dishes(&self) -> impl Iterator<Item = (&str, MealSlot, &DishEntry)> {
        self.days.iter().flat_map(|day| {
            day.named_dishes()
                .map(move |(slot, dish)| (day.label.as_str(), slot, dish))
        })
    }

    /// Daily totals in day order
    #[must_use]
    pub fn weekly_summary(&self) -> Vec<DaySummary> {
        self.days
            .iter()
            .map(|day| DaySummary {
                label: day.label.clone(),
                totals: day.totals(),
            })
            .collect()
    }

    /// Sum over every day
    #[must_use]
    pub fn totals(&self) -> NutritionVector {
        self.days.iter().map(DayPlan::totals).sum()
    }
}
