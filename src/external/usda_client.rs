// ABOUTME: USDA FoodData Central search client used to verify dish nutrition
// ABOUTME: Implements dataset-filtered food search, TTL caching, rate limiting and an in-memory mock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! Search results already carry per-100 g nutrient values, so one search
//! request per dish is enough for verification; no detail calls are made.
//!
//! # Features
//! - Food search restricted to configured dataset types
//! - 24-hour caching to minimize API calls
//! - Sliding-window rate limiting (30 requests per minute by default)
//! - [`MockUsdaClient`] for tests
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use mealwise::external::{FoodDataSource, UsdaClient, UsdaClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = UsdaClient::new(UsdaClientConfig::with_api_key("your_api_key"));
//! let foods = client
//!     .search_foods("oatmeal", 3, &["Survey (FNDDS)".to_owned()])
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::config::AppConfig;
use crate::constants::{defaults, service_names::USDA_API, usda};
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::{create_api_client, map_status_error, map_transport_error};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Source of food search results
///
/// Implemented by the live [`UsdaClient`] and by [`MockUsdaClient`].
#[async_trait]
pub trait FoodDataSource: Send + Sync {
    /// Search foods by free-text query
    ///
    /// `data_types` restricts results to the named datasets; an empty slice
    /// searches every dataset.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty query or page size outside
    /// 1-200, and an external-service error when the search fails.
    async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
        data_types: &[String],
    ) -> AppResult<Vec<FoodSearchResult>>;
}

/// USDA API client configuration
#[derive(Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Cache TTL in seconds (default: 86400 = 24 hours)
    pub cache_ttl_secs: u64,
    /// Rate limit per minute (default: 30)
    pub rate_limit_per_minute: u32,
    /// Per-search timeout
    pub timeout: Duration,
}

impl UsdaClientConfig {
    /// Default settings with the given key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: usda::DEFAULT_BASE_URL.to_owned(),
            cache_ttl_secs: 86_400,
            rate_limit_per_minute: 30,
            timeout: Duration::from_secs(defaults::LOOKUP_TIMEOUT_SECS),
        }
    }

    /// Client settings from application config; `None` when no key is configured
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        let api_key = config.usda.api_key.clone()?;
        Some(Self {
            api_key,
            base_url: config.usda.base_url.clone(),
            cache_ttl_secs: config.usda.cache_ttl_secs,
            rate_limit_per_minute: config.usda.rate_limit_per_minute,
            timeout: config.timeouts.lookup,
        })
    }
}

impl fmt::Debug for UsdaClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsdaClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// USDA Food Search Result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type (e.g., "Survey (FNDDS)", "Foundation", "Branded")
    #[serde(default)]
    pub data_type: Option<String>,
    /// Nutrients per 100 g
    #[serde(default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

impl FoodSearchResult {
    /// Result without nutrients
    #[must_use]
    pub fn new(fdc_id: u64, description: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            fdc_id,
            description: description.into(),
            data_type: Some(data_type.into()),
            food_nutrients: Vec::new(),
        }
    }

    /// Add one nutrient
    #[must_use]
    pub fn with_nutrient(mut self, name: &str, unit: &str, value: f64) -> Self {
        self.food_nutrients.push(FoodNutrient {
            nutrient_id: None,
            nutrient_name: name.to_owned(),
            unit_name: unit.to_owned(),
            value,
        });
        self
    }

    /// Add energy, protein, carbohydrate and fat per 100 g
    #[must_use]
    pub fn with_macros(self, calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        self.with_nutrient(usda::NUTRIENT_ENERGY, usda::UNIT_KCAL, calories)
            .with_nutrient(usda::NUTRIENT_PROTEIN, usda::UNIT_GRAM, protein)
            .with_nutrient(usda::NUTRIENT_CARBS, usda::UNIT_GRAM, carbs)
            .with_nutrient(usda::NUTRIENT_FAT, usda::UNIT_GRAM, fat)
    }

    /// Value of the nutrient with exactly this name and unit
    ///
    /// Units are compared ignoring ASCII case since the API reports `KCAL`
    /// and `G`. Returns 0 when the nutrient is absent.
    #[must_use]
    pub fn nutrient_amount(&self, name: &str, unit: &str) -> f64 {
        self.food_nutrients
            .iter()
            .find(|n| n.nutrient_name == name && n.unit_name.eq_ignore_ascii_case(unit))
            .map_or(0.0, |n| n.value)
    }
}

/// USDA Food Nutrient as embedded in search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrient {
    /// Nutrient ID
    #[serde(default)]
    pub nutrient_id: Option<u32>,
    /// Nutrient name (e.g., "Protein", "Energy")
    #[serde(default)]
    pub nutrient_name: String,
    /// Nutrient unit (e.g., "G", "KCAL", "MG")
    #[serde(default)]
    pub unit_name: String,
    /// Amount per 100 g
    #[serde(default)]
    pub value: f64,
}

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodSearchResult>,
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Sliding-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    /// Time until a request may be made, dropping expired entries
    fn wait_time(&mut self, now: Instant) -> Option<Duration> {
        self.requests
            .retain(|&t| now.duration_since(t) < self.window);
        if self.requests.len() < self.limit.max(1) as usize {
            return None;
        }
        self.requests
            .first()
            .map(|&oldest| self.window.saturating_sub(now.duration_since(oldest)))
    }

    fn record_request(&mut self, at: Instant) {
        self.requests.push(at);
    }

    /// Wait until a request can be made, then record it
    async fn acquire(&mut self) {
        while let Some(wait) = self.wait_time(Instant::now()) {
            debug!(wait_ms = wait.as_millis(), "USDA rate limit reached, waiting");
            tokio::time::sleep(wait.max(Duration::from_millis(10))).await;
        }
        self.record_request(Instant::now());
    }
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
    search_cache: Arc<RwLock<HashMap<String, CacheEntry<Vec<FoodSearchResult>>>>>,
    rate_limiter: Arc<RwLock<RateLimiter>>,
}

impl UsdaClient {
    /// Create a new USDA API client
    #[must_use]
    pub fn new(config: UsdaClientConfig) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, Duration::from_secs(60));

        Self {
            config,
            http_client: create_api_client(),
            search_cache: Arc::new(RwLock::new(HashMap::new())),
            rate_limiter: Arc::new(RwLock::new(rate_limiter)),
        }
    }

    /// Client built from application config, `None` when lookups are disabled
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        UsdaClientConfig::from_app_config(config).map(Self::new)
    }

    fn cache_key(query: &str, page_size: u32, data_types: &[String]) -> String {
        format!(
            "{}:{page_size}:{}",
            query.trim().to_lowercase(),
            data_types.join("|")
        )
    }

    async fn fetch(
        &self,
        query: &str,
        page_size: u32,
        data_types: &[String],
    ) -> AppResult<Vec<FoodSearchResult>> {
        let url = format!("{}/foods/search", self.config.base_url);
        let mut params: Vec<(&str, String)> = vec![
            ("query", query.to_owned()),
            ("pageSize", page_size.to_string()),
            ("api_key", self.config.api_key.clone()),
        ];
        params.extend(data_types.iter().map(|dt| ("dataType", dt.clone())));

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| map_transport_error(USDA_API, &e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(USDA_API, status, &body));
        }

        let search_response: SearchResponse = response
            .json()
            .await
            .map_err(|e| map_transport_error(USDA_API, &e.without_url()))?;
        Ok(search_response.foods)
    }
}

#[async_trait]
impl FoodDataSource for UsdaClient {
    #[instrument(skip(self, data_types), fields(service = USDA_API))]
    async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
        data_types: &[String],
    ) -> AppResult<Vec<FoodSearchResult>> {
        validate_search(query, page_size)?;

        let cache_key = Self::cache_key(query, page_size, data_types);
        {
            let cache = self.search_cache.read().await;
            if let Some(entry) = cache.get(&cache_key) {
                if Instant::now() < entry.expires_at {
                    debug!("USDA search cache hit");
                    return Ok(entry.data.clone());
                }
            }
        }

        {
            let mut limiter = self.rate_limiter.write().await;
            limiter.acquire().await;
        }

        let foods = self.fetch(query, page_size, data_types).await?;
        debug!(results = foods.len(), "USDA search completed");

        {
            let mut cache = self.search_cache.write().await;
            store_fresh(
                &mut cache,
                cache_key,
                foods.clone(),
                Duration::from_secs(self.config.cache_ttl_secs),
                Instant::now(),
            );
        }

        Ok(foods)
    }
}

/// Insert `data` under `key`, dropping entries that expired by `now`
fn store_fresh<T>(
    cache: &mut HashMap<String, CacheEntry<T>>,
    key: String,
    data: T,
    ttl: Duration,
    now: Instant,
) {
    cache.retain(|_, entry| now < entry.expires_at);
    cache.insert(
        key,
        CacheEntry {
            data,
            expires_at: now + ttl,
        },
    );
}

fn validate_search(query: &str, page_size: u32) -> AppResult<()> {
    if query.trim().is_empty() {
        return Err(AppError::invalid_input("Search query cannot be empty"));
    }
    if page_size == 0 || page_size > usda::MAX_PAGE_SIZE {
        return Err(AppError::invalid_input(format!(
            "Page size must be between 1 and {}",
            usda::MAX_PAGE_SIZE
        )));
    }
    Ok(())
}

/// Mock USDA client for testing (no API calls)
///
/// Returns stored foods whose description shares a word with the query,
/// in insertion order, honouring the dataset filter and page size.
pub struct MockUsdaClient {
    foods: Vec<FoodSearchResult>,
    failure: Option<AppError>,
    calls: AtomicUsize,
}

impl MockUsdaClient {
    /// Create a new mock client with predefined survey dishes
    #[must_use]
    pub fn new() -> Self {
        let survey = usda::DATA_TYPE_SURVEY;
        Self::with_foods(vec![
            FoodSearchResult::new(2_705_964, "Chicken breast, baked or broiled", survey)
                .with_macros(165.0, 31.0, 0.1, 3.6),
            FoodSearchResult::new(2_708_470, "Oatmeal, cooked", survey)
                .with_macros(71.0, 2.5, 12.0, 1.5),
            FoodSearchResult::new(2_709_215, "Apple, raw", survey)
                .with_macros(52.0, 0.3, 13.8, 0.2),
            FoodSearchResult::new(2_706_327, "Salmon, baked or broiled", survey)
                .with_macros(206.0, 22.1, 0.0, 12.4),
            FoodSearchResult::new(2_707_512, "Rice, brown, cooked", survey)
                .with_macros(112.0, 2.3, 23.5, 0.8),
        ])
    }

    /// Mock holding exactly these foods
    #[must_use]
    pub fn with_foods(foods: Vec<FoodSearchResult>) -> Self {
        Self {
            foods,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock whose every search fails with `error`
    #[must_use]
    pub fn failing(error: AppError) -> Self {
        Self {
            foods: Vec::new(),
            failure: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of searches made so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn matches(food: &FoodSearchResult, words: &[String], data_types: &[String]) -> bool {
        let in_dataset = data_types.is_empty()
            || food
                .data_type
                .as_ref()
                .is_some_and(|dt| data_types.contains(dt));
        let description = food.description.to_lowercase();
        in_dataset && words.iter().any(|word| description.contains(word.as_str()))
    }
}

impl Default for MockUsdaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FoodDataSource for MockUsdaClient {
    async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
        data_types: &[String],
    ) -> AppResult<Vec<FoodSearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        validate_search(query, page_size)?;
        if let Some(error) = &self.failure {
            return Err(AppError::new(error.code, error.message.clone()));
        }

        let words: Vec<String> = query
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| word.len() > 2)
            .map(ToOwned::to_owned)
            .collect();

        Ok(self
            .foods
            .iter()
            .filter(|food| Self::matches(food, &words, data_types))
            .take(page_size as usize)
            .cloned()
            .collect())
    }
}
