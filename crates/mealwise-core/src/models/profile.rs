// ABOUTME: User profile and dietary preference types driving calorie targets and prompts
// ABOUTME: Biological sex, activity level and goal enums with human labels and parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Normalize a user-typed enum label: lowercase, separators removed
fn label_key(input: &str) -> String {
    input
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Biological sex for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BiologicalSex {
    /// Male constant (+5)
    Male,
    /// Female constant (-161)
    Female,
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
        })
    }
}

impl FromStr for BiologicalSex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match label_key(s).as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(AppError::invalid_input(format!(
                "Unknown biological sex '{s}' (expected male or female)"
            ))),
        }
    }
}

/// Weekly activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Physical job or training twice a day
    VeryActive,
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sedentary => "Sedentary",
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Active => "Active",
            Self::VeryActive => "Very Active",
        })
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match label_key(s).as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" | "lightlyactive" => Ok(Self::Light),
            "moderate" | "moderatelyactive" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "veryactive" => Ok(Self::VeryActive),
            _ => Err(AppError::invalid_input(format!(
                "Unknown activity level '{s}' (expected sedentary, light, moderate, active or very-active)"
            ))),
        }
    }
}

/// Primary dietary goal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Caloric deficit
    LoseWeight,
    /// Caloric balance
    #[default]
    MaintainWeight,
    /// Caloric surplus
    GainMuscle,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoseWeight => "Lose Weight",
            Self::MaintainWeight => "Maintain Weight",
            Self::GainMuscle => "Gain Muscle",
        })
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match label_key(s).as_str() {
            "loseweight" | "lose" => Ok(Self::LoseWeight),
            "maintainweight" | "maintain" => Ok(Self::MaintainWeight),
            "gainmuscle" | "gain" => Ok(Self::GainMuscle),
            _ => Err(AppError::invalid_input(format!(
                "Unknown goal '{s}' (expected lose-weight, maintain-weight or gain-muscle)"
            ))),
        }
    }
}

/// Biophysical profile used for the daily calorie target
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Biological sex
    pub sex: BiologicalSex,
    /// Activity level
    pub activity: ActivityLevel,
    /// Primary goal
    pub goal: Goal,
}

/// Dietary preferences embedded into the meal plan prompt
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealPreferences {
    /// Primary goal
    pub goal: Goal,
    /// Restrictions such as "Vegetarian" or "Gluten-Free"
    #[serde(default)]
    pub restrictions: BTreeSet<String>,
    /// Favorite foods (free text)
    #[serde(default)]
    pub favorites: String,
    /// Disliked foods (free text)
    #[serde(default)]
    pub dislikes: String,
}

impl MealPreferences {
    /// Preferences with only a goal set
    #[must_use]
    pub fn for_goal(goal: Goal) -> Self {
        Self {
            goal,
            ..Self::default()
        }
    }

    /// Add a restriction (blank input is ignored)
    #[must_use]
    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        let restriction = restriction.into();
        let trimmed = restriction.trim();
        if !trimmed.is_empty() {
            self.restrictions.insert(trimmed.to_owned());
        }
        self
    }

    /// Set favorite foods
    #[must_use]
    pub fn with_favorites(mut self, favorites: impl Into<String>) -> Self {
        self.favorites = favorites.into();
        self
    }

    /// Set disliked foods
    #[must_use]
    pub fn with_dislikes(mut self, dislikes: impl Into<String>) -> Self {
        self.dislikes = dislikes.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_parsing_is_forgiving() {
        assert_eq!("Very Active".parse::<ActivityLevel>().ok(), Some(ActivityLevel::VeryActive));
        assert_eq!("very-active".parse::<ActivityLevel>().ok(), Some(ActivityLevel::VeryActive));
        assert_eq!("LOSE_WEIGHT".parse::<Goal>().ok(), Some(Goal::LoseWeight));
        assert_eq!("F".parse::<BiologicalSex>().ok(), Some(BiologicalSex::Female));
        assert!("couch".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_goal_labels_match_prompt_wording() {
        assert_eq!(Goal::MaintainWeight.to_string(), "Maintain Weight");
        assert_eq!(ActivityLevel::VeryActive.to_string(), "Very Active");
    }

    #[test]
    fn test_restrictions_deduplicate() {
        let prefs = MealPreferences::for_goal(Goal::GainMuscle)
            .with_restriction("Vegan")
            .with_restriction("Vegan")
            .with_restriction("  ");
        assert_eq!(prefs.restrictions.len(), 1);
    }
}
