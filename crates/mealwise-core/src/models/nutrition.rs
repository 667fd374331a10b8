// ABOUTME: Macro-nutrient vector shared by meal plans, lookups and reconciliation
// ABOUTME: NutritionVector arithmetic, portion scaling and the Macro selector enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Kilocalories per gram of protein
const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Kilocalories per gram of carbohydrate
const KCAL_PER_G_CARBS: f64 = 4.0;
/// Kilocalories per gram of fat
const KCAL_PER_G_FAT: f64 = 9.0;

/// One of the four tracked macro quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Macro {
    /// Energy in kcal
    Calories,
    /// Protein in grams
    Protein,
    /// Carbohydrates in grams
    Carbs,
    /// Fat in grams
    Fat,
}

impl Macro {
    /// All macros in canonical order
    pub const ALL: [Self; 4] = [Self::Calories, Self::Protein, Self::Carbs, Self::Fat];

    /// Key used in meal plan JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fat => "fat",
        }
    }

    /// Display unit
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Calories => "kcal",
            Self::Protein | Self::Carbs | Self::Fat => "g",
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calories, protein, carbs and fat for a portion (or per 100 g for lookup results)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionVector {
    /// Energy (kcal)
    #[serde(default)]
    pub calories: f64,
    /// Protein (g)
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates (g)
    #[serde(default)]
    pub carbs: f64,
    /// Fat (g)
    #[serde(default)]
    pub fat: f64,
}

impl NutritionVector {
    /// Create a vector from its four components
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Read one macro
    #[must_use]
    pub const fn get(&self, nutrient: Macro) -> f64 {
        match nutrient {
            Macro::Calories => self.calories,
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }

    /// True when every macro is strictly positive
    ///
    /// Partial records (any zero or missing value) are unusable as a reference.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Macro::ALL.iter().all(|m| self.get(*m) > 0.0)
    }

    /// Multiply every component by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }

    /// Convert a per-100 g vector to the given portion
    #[must_use]
    pub fn per_portion(per_100g: &Self, portion_grams: f64) -> Self {
        per_100g.scaled(portion_grams / 100.0)
    }

    /// Energy contributed by each macro (protein, carbs, fat) in kcal
    #[must_use]
    pub fn macro_energy(&self) -> (f64, f64, f64) {
        (
            self.protein * KCAL_PER_G_PROTEIN,
            self.carbs * KCAL_PER_G_CARBS,
            self.fat * KCAL_PER_G_FAT,
        )
    }
}

impl Add for NutritionVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl Sum for NutritionVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Self> for NutritionVector {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
