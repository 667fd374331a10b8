// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Calorie target command for the mealwise CLI
// ABOUTME: Computes BMR, TDEE and the goal-adjusted target without any API call

use crate::helpers::display::display_calorie_target;
use anyhow::Result;
use mealwise::config::CalorieTargetConfig;
use mealwise::intelligence::calculate_calorie_target;
use mealwise::models::UserProfile;

/// Print the calorie target breakdown for a profile
pub fn run(profile: &UserProfile) -> Result<()> {
    let target = calculate_calorie_target(profile, &CalorieTargetConfig::default())?;
    display_calorie_target(profile, &target);
    Ok(())
}
