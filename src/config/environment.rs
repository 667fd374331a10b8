// ABOUTME: Environment configuration read once at start-up into an explicit AppConfig
// ABOUTME: API credentials, base URLs, lookup thresholds, reconciliation tolerance and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! [`AppConfig::from_env`] is the only place that reads process environment.
//! Everything downstream receives configuration by reference.

use super::nutrition::CalorieTargetConfig;
use crate::constants::{defaults, env_keys, usda};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default generative model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
/// Default generative API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Generative model API settings
#[derive(Clone)]
pub struct GeminiApiConfig {
    /// API key (never logged)
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
}

impl fmt::Debug for GeminiApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// USDA `FoodData` Central settings
#[derive(Clone)]
pub struct UsdaApiConfig {
    /// API key; lookups are disabled without one
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Search cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Requests allowed per minute
    pub rate_limit_per_minute: u32,
}

impl Default for UsdaApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: usda::DEFAULT_BASE_URL.to_owned(),
            cache_ttl_secs: 86_400,
            rate_limit_per_minute: 30,
        }
    }
}

impl fmt::Debug for UsdaApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsdaApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

/// Dish-name lookup tuning
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Minimum fuzzy score (0-100) to accept a candidate
    pub min_match_score: u8,
    /// Candidates requested per search
    pub page_size: u32,
    /// Dataset filter sent with every search
    pub data_types: Vec<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            min_match_score: defaults::MIN_MATCH_SCORE,
            page_size: defaults::LOOKUP_PAGE_SIZE,
            data_types: vec![usda::DATA_TYPE_SURVEY.to_owned()],
        }
    }
}

/// Plan-versus-database comparison tuning
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciliationConfig {
    /// Relative deviation above which a macro is flagged (0.15 = 15%)
    pub variance_tolerance: f64,
    /// Upper bound on in-flight lookups
    pub max_concurrent_lookups: usize,
    /// Scale per-100 g references to the dish portion before comparing
    pub scale_reference_to_portion: bool,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            variance_tolerance: defaults::VARIANCE_TOLERANCE,
            max_concurrent_lookups: defaults::LOOKUP_CONCURRENCY,
            scale_reference_to_portion: defaults::SCALE_REFERENCE_TO_PORTION,
        }
    }
}

/// Per-call timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Meal plan generation
    pub meal_plan: Duration,
    /// Grocery list generation
    pub grocery: Duration,
    /// Photo analysis
    pub vision: Duration,
    /// Nutrition database search
    pub lookup: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            meal_plan: Duration::from_secs(defaults::MEAL_PLAN_TIMEOUT_SECS),
            grocery: Duration::from_secs(defaults::GROCERY_TIMEOUT_SECS),
            vision: Duration::from_secs(defaults::VISION_TIMEOUT_SECS),
            lookup: Duration::from_secs(defaults::LOOKUP_TIMEOUT_SECS),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Generative model API
    pub gemini: GeminiApiConfig,
    /// Nutrition database API
    pub usda: UsdaApiConfig,
    /// Lookup tuning
    pub lookup: LookupConfig,
    /// Reconciliation tuning
    pub reconciliation: ReconciliationConfig,
    /// Per-call timeouts
    pub timeouts: TimeoutConfig,
    /// Calorie target coefficients
    pub calorie_target: CalorieTargetConfig,
}

impl AppConfig {
    /// Configuration with defaults everywhere except the required model key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            gemini: GeminiApiConfig {
                api_key: api_key.into(),
                model: DEFAULT_GEMINI_MODEL.to_owned(),
                base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
            },
            usda: UsdaApiConfig::default(),
            lookup: LookupConfig::default(),
            reconciliation: ReconciliationConfig::default(),
            timeouts: TimeoutConfig::default(),
            calorie_target: CalorieTargetConfig::default(),
        }
    }

    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no model key is set and `ConfigInvalid`
    /// for malformed or out-of-range values.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_source<F>(source: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| source(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_key = read(env_keys::GEMINI_API_KEY)
            .or_else(|| read(env_keys::GOOGLE_API_KEY))
            .ok_or_else(|| AppError::config_missing(env_keys::GEMINI_API_KEY))?;

        let mut config = Self::with_api_key(api_key);

        if let Some(model) = read(env_keys::GEMINI_MODEL) {
            config.gemini.model = model;
        }
        if let Some(base_url) = read(env_keys::GEMINI_BASE_URL) {
            config.gemini.base_url = base_url.trim_end_matches('/').to_owned();
        }

        config.usda.api_key = read(env_keys::USDA_API_KEY);
        if config.usda.api_key.is_none() {
            warn!("{} not set; nutrition database lookups are disabled", env_keys::USDA_API_KEY);
        }
        if let Some(base_url) = read(env_keys::USDA_BASE_URL) {
            config.usda.base_url = base_url.trim_end_matches('/').to_owned();
        }

        if let Some(score) = parse_var(&read, env_keys::MATCH_THRESHOLD)? {
            config.lookup.min_match_score = score;
        }
        if let Some(page_size) = parse_var(&read, env_keys::LOOKUP_PAGE_SIZE)? {
            config.lookup.page_size = page_size;
        }
        if let Some(data_types) = read(env_keys::USDA_DATA_TYPES) {
            config.lookup.data_types = parse_list(&data_types);
        }

        if let Some(tolerance) = parse_var(&read, env_keys::VARIANCE_TOLERANCE)? {
            config.reconciliation.variance_tolerance = tolerance;
        }
        if let Some(concurrency) = parse_var(&read, env_keys::LOOKUP_CONCURRENCY)? {
            config.reconciliation.max_concurrent_lookups = concurrency;
        }
        if let Some(scale) = parse_var(&read, env_keys::SCALE_REFERENCE_TO_PORTION)? {
            config.reconciliation.scale_reference_to_portion = scale;
        }

        let timeouts = &mut config.timeouts;
        for (key, slot) in [
            (env_keys::MEAL_PLAN_TIMEOUT_SECS, &mut timeouts.meal_plan),
            (env_keys::GROCERY_TIMEOUT_SECS, &mut timeouts.grocery),
            (env_keys::VISION_TIMEOUT_SECS, &mut timeouts.vision),
            (env_keys::LOOKUP_TIMEOUT_SECS, &mut timeouts.lookup),
        ] {
            if let Some(secs) = parse_var::<u64, _>(&read, key)? {
                *slot = Duration::from_secs(secs);
            }
        }

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first offending value.
    pub fn validate(&self) -> AppResult<()> {
        if self.lookup.min_match_score > 100 {
            return Err(AppError::config_invalid(format!(
                "{} must be between 0 and 100",
                env_keys::MATCH_THRESHOLD
            )));
        }
        if self.lookup.page_size == 0 || self.lookup.page_size > usda::MAX_PAGE_SIZE {
            return Err(AppError::config_invalid(format!(
                "{} must be between 1 and {}",
                env_keys::LOOKUP_PAGE_SIZE,
                usda::MAX_PAGE_SIZE
            )));
        }
        if !(self.reconciliation.variance_tolerance.is_finite()
            && self.reconciliation.variance_tolerance > 0.0)
        {
            return Err(AppError::config_invalid(format!(
                "{} must be a positive fraction",
                env_keys::VARIANCE_TOLERANCE
            )));
        }
        if self.reconciliation.max_concurrent_lookups == 0 {
            return Err(AppError::config_invalid(format!(
                "{} must be at least 1",
                env_keys::LOOKUP_CONCURRENCY
            )));
        }
        let timeouts = [
            self.timeouts.meal_plan,
            self.timeouts.grocery,
            self.timeouts.vision,
            self.timeouts.lookup,
        ];
        if timeouts.iter().any(Duration::is_zero) {
            return Err(AppError::config_invalid("Timeouts must be at least one second"));
        }
        Ok(())
    }

    /// Whether nutrition database lookups are possible
    #[must_use]
    pub fn lookup_enabled(&self) -> bool {
        self.usda.api_key.is_some()
    }

    /// Human-readable configuration summary (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Mealwise Configuration:\n\
             - Model: {}\n\
             - Model API: {}\n\
             - Nutrition Lookup: {}\n\
             - Dataset Filter: {}\n\
             - Match Threshold: {}\n\
             - Variance Tolerance: {:.0}%\n\
             - Lookup Concurrency: {}\n\
             - Timeouts (plan/grocery/vision/lookup): {}s/{}s/{}s/{}s",
            self.gemini.model,
            self.gemini.base_url,
            if self.lookup_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.lookup.data_types.join(", "),
            self.lookup.min_match_score,
            self.reconciliation.variance_tolerance * 100.0,
            self.reconciliation.max_concurrent_lookups,
            self.timeouts.meal_plan.as_secs(),
            self.timeouts.grocery.as_secs(),
            self.timeouts.vision.as_secs(),
            self.timeouts.lookup.as_secs(),
        )
    }
}

/// Parse an optional variable, reporting malformed values as `ConfigInvalid`
fn parse_var<T, F>(read: &F, key: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    read(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| {
                AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}"))
            })
        })
        .transpose()
}

/// Parse a comma-separated list, dropping blanks
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
