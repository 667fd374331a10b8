// ABOUTME: Food photo analyzer combining a vision model guess with database nutrition
// ABOUTME: Sends the image inline, extracts lenient JSON and enriches it through the lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::extraction::{extract_json_as, ExtractionMode};
use crate::intelligence::NutritionLookup;
use crate::llm::prompts::food_image_prompt;
use crate::llm::{ChatMessage, ChatRequest, InlineImage, LlmProvider};
use crate::models::{FoodImageAnalysis, NutritionSource, NutritionVector};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Analyzes food photos with a vision-capable model
#[derive(Clone)]
pub struct FoodImageAnalyzer {
    provider: Arc<dyn LlmProvider>,
    lookup: NutritionLookup,
    timeout: Duration,
}

impl FoodImageAnalyzer {
    /// Create an analyzer
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, lookup: NutritionLookup, timeout: Duration) -> Self {
        Self {
            provider,
            lookup,
            timeout,
        }
    }

    /// Analyze a JPEG photo
    ///
    /// # Errors
    ///
    /// See [`FoodImageAnalyzer::analyze_with_mime`].
    pub async fn analyze(&self, image: &[u8], language: &str) -> AppResult<FoodImageAnalysis> {
        self.analyze_with_mime(image, defaults::IMAGE_MIME_TYPE, language)
            .await
    }

    /// Analyze a photo of the given MIME type
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty image
    /// - `ConfigInvalid` when the provider cannot see images
    /// - transport errors from the provider
    /// - `ExtractionFailed`/`ParseFailed` when the reply is not usable JSON
    #[instrument(skip(self, image), fields(bytes = image.len()))]
    pub async fn analyze_with_mime(
        &self,
        image: &[u8],
        mime_type: &str,
        language: &str,
    ) -> AppResult<FoodImageAnalysis> {
        if image.is_empty() {
            return Err(AppError::invalid_input("Image is empty"));
        }
        if !self.provider.capabilities().supports_vision() {
            return Err(AppError::config_invalid(format!(
                "{} does not support image input",
                self.provider.display_name()
            )));
        }

        let language = if language.trim().is_empty() {
            defaults::LANGUAGE
        } else {
            language.trim()
        };

        let request = ChatRequest::new(vec![ChatMessage::user_with_image(
            food_image_prompt(language),
            InlineImage::new(mime_type, image.to_vec()),
        )])
        .with_timeout(self.timeout);

        let response = self.provider.complete(&request).await?;
        let mut analysis: FoodImageAnalysis =
            extract_json_as(&response.content, ExtractionMode::Lenient)?;

        self.enrich(&mut analysis).await;
        info!(
            food = analysis.food.as_deref().unwrap_or("unknown"),
            source = ?analysis.data_source,
            "Food image analyzed"
        );
        Ok(analysis)
    }

    /// Attach database nutrition scaled to the estimated portion
    async fn enrich(&self, analysis: &mut FoodImageAnalysis) {
        let Some(food) = analysis.food.as_deref() else {
            debug!("Vision reply names no food, keeping the model estimate");
            analysis.data_source = NutritionSource::ModelEstimate;
            return;
        };

        match self.lookup.lookup(food).await {
            Some(per_100g) => {
                analysis.verified_nutrition = Some(NutritionVector::per_portion(
                    &per_100g,
                    analysis.portion_grams,
                ));
                analysis.data_source = NutritionSource::Database;
            }
            None => {
                analysis.verified_nutrition = None;
                analysis.data_source = NutritionSource::ModelEstimate;
            }
        }
    }
}

/// MIME type for an image file, from its extension (JPEG when unknown)
#[must_use]
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => defaults::IMAGE_MIME_TYPE,
    }
}
