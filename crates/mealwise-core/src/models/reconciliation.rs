// ABOUTME: Reconciliation report comparing model-estimated and database-verified macros
// ABOUTME: Per-dish discrepancy records with signed variance percentages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::meal_plan::MealSlot;
use super::nutrition::Macro;
use serde::{Deserialize, Serialize};

/// One macro whose generated value strays beyond tolerance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroDiscrepancy {
    /// Which macro
    pub nutrient: Macro,
    /// Value from the generated plan
    pub generated: f64,
    /// Database reference value
    pub reference: f64,
    /// Signed deviation in percent, one decimal
    pub variance_percent: f64,
}

impl MacroDiscrepancy {
    /// Build a discrepancy, computing the rounded signed variance
    ///
    /// `reference` must be strictly positive.
    #[must_use]
    pub fn new(nutrient: Macro, generated: f64, reference: f64) -> Self {
        let variance = (generated - reference) / reference * 100.0;
        Self {
            nutrient,
            generated,
            reference,
            variance_percent: (variance * 10.0).round() / 10.0,
        }
    }
}

/// A dish with at least one flagged macro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishDiscrepancy {
    /// Dish name
    pub dish: String,
    /// Day label the dish appears on
    pub day: String,
    /// Slot the dish appears in
    pub slot: MealSlot,
    /// Flagged macros, in canonical macro order
    pub macros: Vec<MacroDiscrepancy>,
}

/// Outcome of cross-checking a plan against the nutrition database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Named dishes examined (per occurrence)
    pub total_dishes: usize,
    /// Occurrences for which a reference was found
    pub verified_dishes: usize,
    /// Dishes with flagged macros
    pub discrepancies: Vec<DishDiscrepancy>,
}

impl ReconciliationReport {
    /// Fraction of dishes that could be verified (0 when nothing was examined)
    #[must_use]
    pub fn verification_rate(&self) -> f64 {
        if self.total_dishes == 0 {
            return 0.0;
        }
        self.verified_dishes as f64 / self.total_dishes as f64
    }

    /// True when no verified dish was flagged
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }
}
