// ABOUTME: Cross-checks model-generated dish nutrition against database references
// ABOUTME: Bounded concurrent lookups per distinct dish, tolerance-based macro flagging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Reconciler
//!
//! Every named dish occurrence in the plan is counted. Distinct dish names
//! are looked up once each through an order-preserving buffered stream, so
//! results are attributed by position and never by completion order.
//!
//! For each occurrence with a reference, a macro is flagged when
//! `|generated - reference| / reference` exceeds the tolerance. Macros whose
//! reference is not strictly positive are never compared. The reference is
//! the per-100 g record as returned unless `scale_reference_to_portion`
//! asks for it to be scaled to the dish portion first.

use super::nutrition_lookup::NutritionLookup;
use crate::config::ReconciliationConfig;
use crate::models::{
    DishDiscrepancy, Macro, MacroDiscrepancy, MealPlan, NutritionVector, ReconciliationReport,
};
use futures_util::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument};

/// Plan-versus-database comparator
#[derive(Debug, Clone)]
pub struct NutritionReconciler {
    lookup: NutritionLookup,
    config: ReconciliationConfig,
}

impl NutritionReconciler {
    /// Create a reconciler over a lookup
    #[must_use]
    pub const fn new(lookup: NutritionLookup, config: ReconciliationConfig) -> Self {
        Self { lookup, config }
    }

    /// Tuning in use
    #[must_use]
    pub const fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Compare every named dish of `plan` with its database reference
    ///
    /// Lookup failures only reduce `verified_dishes`; this never fails.
    #[instrument(skip_all, fields(days = plan.len()))]
    pub async fn reconcile(&self, plan: &MealPlan) -> ReconciliationReport {
        let occurrences: Vec<_> = plan
            .named_dishes()
            .filter_map(|(day, slot, dish)| dish.name().map(|name| (day, slot, dish, name)))
            .collect();

        let mut seen = HashSet::new();
        let distinct: Vec<&str> = occurrences
            .iter()
            .map(|(_, _, _, name)| *name)
            .filter(|name| seen.insert(*name))
            .collect();

        let references: HashMap<&str, Option<NutritionVector>> = stream::iter(distinct)
            .map(|name| async move { (name, self.lookup.lookup(name).await) })
            .buffered(self.config.max_concurrent_lookups.max(1))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect();

        let mut report = ReconciliationReport {
            total_dishes: occurrences.len(),
            ..ReconciliationReport::default()
        };

        for (day, slot, dish, name) in occurrences {
            let Some(Some(per_100g)) = references.get(name) else {
                continue;
            };
            report.verified_dishes += 1;

            let reference = if self.config.scale_reference_to_portion {
                NutritionVector::per_portion(per_100g, dish.portion_grams)
            } else {
                *per_100g
            };
            let macros =
                compare_macros(&dish.nutrition, &reference, self.config.variance_tolerance);
            if !macros.is_empty() {
                report.discrepancies.push(DishDiscrepancy {
                    dish: name.to_owned(),
                    day: day.to_owned(),
                    slot,
                    macros,
                });
            }
        }

        info!(
            total_dishes = report.total_dishes,
            verified_dishes = report.verified_dishes,
            flagged_dishes = report.discrepancies.len(),
            "Nutrition reconciliation complete"
        );
        report
    }
}

/// Macros of `generated` deviating from `reference` by more than `tolerance`
///
/// The comparison is strict: a deviation of exactly `tolerance` passes.
#[must_use]
pub fn compare_macros(
    generated: &NutritionVector,
    reference: &NutritionVector,
    tolerance: f64,
) -> Vec<MacroDiscrepancy> {
    Macro::ALL
        .into_iter()
        .filter_map(|nutrient| {
            let expected = reference.get(nutrient);
            if expected <= 0.0 {
                return None;
            }
            let actual = generated.get(nutrient);
            ((actual - expected).abs() / expected > tolerance)
                .then(|| MacroDiscrepancy::new(nutrient, actual, expected))
        })
        .collect()
}
