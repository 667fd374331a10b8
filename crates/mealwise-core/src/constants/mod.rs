// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Meal slots, USDA nutrient identifiers, default thresholds and environment keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large namespace.

/// Canonical meal slot names as they appear in meal plan JSON
pub mod meal_slots {
    /// Breakfast slot key
    pub const BREAKFAST: &str = "breakfast";
    /// Lunch slot key
    pub const LUNCH: &str = "lunch";
    /// Dinner slot key
    pub const DINNER: &str = "dinner";
    /// Snacks slot key (may hold one or several dishes)
    pub const SNACKS: &str = "snacks";

    /// Slots walked by reconciliation and grocery synthesis, in display order
    pub const CANONICAL: [&str; 4] = [BREAKFAST, LUNCH, DINNER, SNACKS];
}

/// USDA `FoodData` Central nutrient names and units
pub mod usda {
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";

    /// Survey dataset (FNDDS) - prepared dishes as eaten
    pub const DATA_TYPE_SURVEY: &str = "Survey (FNDDS)";

    /// Energy nutrient name
    pub const NUTRIENT_ENERGY: &str = "Energy";
    /// Protein nutrient name
    pub const NUTRIENT_PROTEIN: &str = "Protein";
    /// Carbohydrate nutrient name
    pub const NUTRIENT_CARBS: &str = "Carbohydrate, by difference";
    /// Fat nutrient name
    pub const NUTRIENT_FAT: &str = "Total lipid (fat)";

    /// Kilocalorie unit
    pub const UNIT_KCAL: &str = "KCAL";
    /// Gram unit
    pub const UNIT_GRAM: &str = "G";

    /// Largest page the search endpoint accepts
    pub const MAX_PAGE_SIZE: u32 = 200;
}

/// Default tuning values for lookup and reconciliation
pub mod defaults {
    /// Minimum fuzzy score (0-100) for a database candidate to be accepted
    pub const MIN_MATCH_SCORE: u8 = 65;
    /// Relative deviation above which a macro is flagged
    pub const VARIANCE_TOLERANCE: f64 = 0.15;
    /// Candidates requested per lookup
    pub const LOOKUP_PAGE_SIZE: u32 = 3;
    /// Concurrent nutrition lookups during reconciliation
    pub const LOOKUP_CONCURRENCY: usize = 4;
    /// Compare plan values against the per-100 g reference as returned
    pub const SCALE_REFERENCE_TO_PORTION: bool = false;
    /// Portion assumed when a dish or image guess carries none
    pub const PORTION_GRAMS: f64 = 100.0;

    /// Meal plan generation timeout
    pub const MEAL_PLAN_TIMEOUT_SECS: u64 = 180;
    /// Grocery list generation timeout
    pub const GROCERY_TIMEOUT_SECS: u64 = 90;
    /// Vision analysis timeout
    pub const VISION_TIMEOUT_SECS: u64 = 60;
    /// Nutrition database lookup timeout
    pub const LOOKUP_TIMEOUT_SECS: u64 = 15;

    /// Sampling temperature for meal plans (consistency over creativity)
    pub const MEAL_PLAN_TEMPERATURE: f32 = 0.6;
    /// Sampling temperature for grocery lists
    pub const GROCERY_TEMPERATURE: f32 = 0.3;

    /// Language used for dish labels and grocery items
    pub const LANGUAGE: &str = "English";
    /// MIME type assumed for uploaded food photos
    pub const IMAGE_MIME_TYPE: &str = "image/jpeg";
}

/// Environment variable names read once by `AppConfig::from_env`
pub mod env_keys {
    /// Generative model API key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Accepted alias for the generative model key
    pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
    /// Nutrition database API key (optional)
    pub const USDA_API_KEY: &str = "USDA_API_KEY";
    /// Generative model identifier
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Generative API base URL override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Nutrition database base URL override
    pub const USDA_BASE_URL: &str = "USDA_BASE_URL";
    /// Minimum fuzzy score
    pub const MATCH_THRESHOLD: &str = "MEALWISE_MATCH_THRESHOLD";
    /// Reconciliation tolerance (fraction)
    pub const VARIANCE_TOLERANCE: &str = "MEALWISE_VARIANCE_TOLERANCE";
    /// Comma separated dataset filter
    pub const USDA_DATA_TYPES: &str = "MEALWISE_USDA_DATA_TYPES";
    /// Candidates per lookup
    pub const LOOKUP_PAGE_SIZE: &str = "MEALWISE_LOOKUP_PAGE_SIZE";
    /// Concurrent lookups
    pub const LOOKUP_CONCURRENCY: &str = "MEALWISE_LOOKUP_CONCURRENCY";
    /// Scale database references to the dish portion before comparing
    pub const SCALE_REFERENCE_TO_PORTION: &str = "MEALWISE_SCALE_REFERENCE_TO_PORTION";
    /// Meal plan timeout
    pub const MEAL_PLAN_TIMEOUT_SECS: &str = "MEALWISE_MEAL_PLAN_TIMEOUT_SECS";
    /// Grocery timeout
    pub const GROCERY_TIMEOUT_SECS: &str = "MEALWISE_GROCERY_TIMEOUT_SECS";
    /// Vision timeout
    pub const VISION_TIMEOUT_SECS: &str = "MEALWISE_VISION_TIMEOUT_SECS";
    /// Lookup timeout
    pub const LOOKUP_TIMEOUT_SECS: &str = "MEALWISE_LOOKUP_TIMEOUT_SECS";
}

/// Service names for structured logging and error messages
pub mod service_names {
    /// Application name
    pub const MEALWISE: &str = "mealwise";
    /// Generative model service label
    pub const GEMINI_API: &str = "Gemini API";
    /// Nutrition database service label
    pub const USDA_API: &str = "USDA API";
}
