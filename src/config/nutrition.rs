// ABOUTME: Calorie target configuration for BMR, activity and goal adjustments
// ABOUTME: Mifflin-St Jeor coefficients, activity multipliers and safety floors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie Target Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology

use serde::{Deserialize, Serialize};

/// Everything needed to turn a profile into a daily calorie target
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CalorieTargetConfig {
    /// BMR formula coefficients and input limits
    pub bmr: BmrConfig,
    /// Activity multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Goal-based kcal adjustments
    pub goal_adjustments: GoalAdjustmentConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
    /// Lowest BMR ever reported (kcal/day)
    pub minimum_bmr: f64,
    /// Accepted weight range (kg)
    pub weight_range_kg: (f64, f64),
    /// Accepted height range (cm)
    pub height_range_cm: (f64, f64),
    /// Accepted age range (years)
    pub age_range: (u32, u32),
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            minimum_bmr: 1000.0,
            weight_range_kg: (30.0, 300.0),
            height_range_cm: (100.0, 250.0),
            age_range: (10, 100),
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Active: 1.725
    pub active: f64,
    /// Very active: 1.9
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

/// Daily kcal offsets applied to TDEE per goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalAdjustmentConfig {
    /// Deficit for weight loss
    pub lose_weight: f64,
    /// Offset for maintenance
    pub maintain_weight: f64,
    /// Surplus for muscle gain
    pub gain_muscle: f64,
    /// Final target never drops below this (kcal/day)
    pub minimum_target: f64,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            lose_weight: -500.0,
            maintain_weight: 0.0,
            gain_muscle: 300.0,
            minimum_target: 1200.0,
        }
    }
}
