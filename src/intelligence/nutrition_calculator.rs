// ABOUTME: Daily calorie target calculation from a user profile
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled TDEE and goal adjustment with safety floors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Calorie Target Calculator
//!
//! The target fed into the meal plan prompt is computed in three steps:
//!
//! 1. BMR with the Mifflin-St Jeor equation
//! 2. TDEE = BMR x activity factor
//! 3. target = TDEE + goal adjustment, rounded and floored
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use crate::config::{ActivityFactorsConfig, BmrConfig, CalorieTargetConfig, GoalAdjustmentConfig};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, BiologicalSex, Goal, UserProfile};
use serde::{Deserialize, Serialize};

/// Breakdown of a computed daily calorie target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieTarget {
    /// Basal Metabolic Rate in kcal/day
    pub bmr: f64,
    /// Total Daily Energy Expenditure in kcal/day
    pub tdee: f64,
    /// Goal adjustment applied to TDEE (kcal/day)
    pub adjustment: f64,
    /// Final daily target (kcal/day)
    pub target_kcal: u32,
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `sex_offset`
/// - Men: +5
/// - Women: -161
///
/// # Errors
///
/// Returns `InvalidInput` when weight, height or age fall outside the
/// configured ranges (30-300 kg, 100-250 cm, 10-100 years by default).
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: BiologicalSex,
    config: &BmrConfig,
) -> AppResult<f64> {
    let (min_weight, max_weight) = config.weight_range_kg;
    if !(min_weight..=max_weight).contains(&weight_kg) {
        return Err(AppError::invalid_input(format!(
            "Weight must be between {min_weight} and {max_weight} kg"
        )));
    }
    let (min_height, max_height) = config.height_range_cm;
    if !(min_height..=max_height).contains(&height_cm) {
        return Err(AppError::invalid_input(format!(
            "Height must be between {min_height} and {max_height} cm"
        )));
    }
    let (min_age, max_age) = config.age_range;
    if !(min_age..=max_age).contains(&age) {
        return Err(AppError::invalid_input(format!(
            "Age must be between {min_age} and {max_age} years"
        )));
    }

    let sex_constant = match sex {
        BiologicalSex::Male => config.msj_male_constant,
        BiologicalSex::Female => config.msj_female_constant,
    };

    let bmr = config.msj_weight_coef * weight_kg
        + config.msj_height_coef * height_cm
        + config.msj_age_coef * f64::from(age)
        + sex_constant;

    Ok(bmr.max(config.minimum_bmr))
}

/// Calculate Total Daily Energy Expenditure
///
/// # Errors
///
/// Returns `InvalidInput` when `bmr` is not positive.
pub fn calculate_tdee(
    bmr: f64,
    activity: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> AppResult<f64> {
    if bmr.is_nan() || bmr <= 0.0 {
        return Err(AppError::invalid_input("BMR must be positive"));
    }

    let factor = match activity {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::Light => config.light,
        ActivityLevel::Moderate => config.moderate,
        ActivityLevel::Active => config.active,
        ActivityLevel::VeryActive => config.very_active,
    };

    Ok(bmr * factor)
}

/// Daily kcal offset for a goal
#[must_use]
pub fn goal_adjustment(goal: Goal, config: &GoalAdjustmentConfig) -> f64 {
    match goal {
        Goal::LoseWeight => config.lose_weight,
        Goal::MaintainWeight => config.maintain_weight,
        Goal::GainMuscle => config.gain_muscle,
    }
}

/// Compute the daily calorie target for a profile
///
/// # Errors
///
/// Propagates validation errors from [`calculate_bmr`].
pub fn calculate_calorie_target(
    profile: &UserProfile,
    config: &CalorieTargetConfig,
) -> AppResult<CalorieTarget> {
    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.sex,
        &config.bmr,
    )?;
    let tdee = calculate_tdee(bmr, profile.activity, &config.activity_factors)?;
    let adjustment = goal_adjustment(profile.goal, &config.goal_adjustments);
    let target = (tdee + adjustment)
        .round()
        .max(config.goal_adjustments.minimum_target);

    Ok(CalorieTarget {
        bmr,
        tdee,
        adjustment,
        target_kcal: target as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_profile() -> UserProfile {
        UserProfile {
            age: 30,
            weight_kg: 70.0,
            height_cm: 170.0,
            sex: BiologicalSex::Male,
            activity: ActivityLevel::Moderate,
            goal: Goal::MaintainWeight,
        }
    }

    #[test]
    fn test_bmr_male_and_female() {
        let config = BmrConfig::default();
        let male = calculate_bmr(70.0, 170.0, 30, BiologicalSex::Male, &config).unwrap();
        assert!((male - 1617.5).abs() < 1e-9);
        let female = calculate_bmr(70.0, 170.0, 30, BiologicalSex::Female, &config).unwrap();
        assert!((female - 1451.5).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_floor() {
        let config = BmrConfig::default();
        let bmr = calculate_bmr(30.0, 100.0, 100, BiologicalSex::Female, &config).unwrap();
        assert!((bmr - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmr_rejects_out_of_range_inputs() {
        let config = BmrConfig::default();
        assert!(calculate_bmr(29.0, 170.0, 30, BiologicalSex::Male, &config).is_err());
        assert!(calculate_bmr(70.0, 260.0, 30, BiologicalSex::Male, &config).is_err());
        assert!(calculate_bmr(70.0, 170.0, 9, BiologicalSex::Male, &config).is_err());
        assert!(calculate_bmr(f64::NAN, 170.0, 30, BiologicalSex::Male, &config).is_err());
    }

    #[test]
    fn test_reference_profile_target() {
        let target =
            calculate_calorie_target(&reference_profile(), &CalorieTargetConfig::default())
                .unwrap();
        assert_eq!(target.target_kcal, 2507);
        assert!(target.adjustment.abs() < f64::EPSILON);
    }

    #[test]
    fn test_goal_adjustments_and_floor() {
        let config = CalorieTargetConfig::default();
        let mut profile = reference_profile();

        profile.goal = Goal::LoseWeight;
        assert_eq!(
            calculate_calorie_target(&profile, &config).unwrap().target_kcal,
            2007
        );

        profile.goal = Goal::GainMuscle;
        assert_eq!(
            calculate_calorie_target(&profile, &config).unwrap().target_kcal,
            2807
        );

        let small = UserProfile {
            age: 90,
            weight_kg: 35.0,
            height_cm: 120.0,
            sex: BiologicalSex::Female,
            activity: ActivityLevel::Sedentary,
            goal: Goal::LoseWeight,
        };
        assert_eq!(
            calculate_calorie_target(&small, &config).unwrap().target_kcal,
            1200
        );
    }
}
