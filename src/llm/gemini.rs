// ABOUTME: Google Gemini provider implementation for text and vision generateContent calls
// ABOUTME: Builds request payloads with inline image parts and maps API failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models via
//! the Generative Language REST API (`models/{model}:generateContent`).
//!
//! Images travel as `inline_data` parts carrying standard base64 bytes, after
//! the text part of the same message.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage,
};
use crate::config::environment::{GeminiApiConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::constants::service_names;
use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;
use crate::utils::http_client::{create_api_client, map_status_error, map_transport_error};

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content structure for Gemini API requests
#[derive(Debug, Serialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<ContentPart>,
}

/// Part of request content
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    /// Text content
    Text { text: String },
    /// Base64 image bytes
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Generation configuration
#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    candidate_count: u32,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    default_model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key and default endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: create_api_client(),
            default_model: DEFAULT_GEMINI_MODEL.to_owned(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from loaded configuration
    #[must_use]
    pub fn from_config(config: &GeminiApiConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_default_model(config.model.clone())
            .with_base_url(config.base_url.clone())
    }

    /// Set a custom default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Point the provider at another endpoint (proxies, local fakes)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Build the API URL for a model and method
    fn build_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{model}:{method}?key={}",
            self.base_url, self.api_key
        )
    }

    /// Convert our message role to Gemini's role format
    const fn convert_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::System | MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    fn message_parts(message: &ChatMessage) -> Vec<ContentPart> {
        let mut parts = Vec::with_capacity(1 + message.images.len());
        if !message.content.is_empty() {
            parts.push(ContentPart::Text {
                text: message.content.clone(),
            });
        }
        parts.extend(message.images.iter().map(|image| ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.to_base64(),
            },
        }));
        parts
    }

    /// Build a Gemini API request from a `ChatRequest`
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let mut contents = Vec::new();
        let mut system_instruction = None;

        for message in &request.messages {
            if message.role == MessageRole::System {
                system_instruction = Some(GeminiContent {
                    role: None,
                    parts: Self::message_parts(message),
                });
            } else {
                contents.push(GeminiContent {
                    role: Some(Self::convert_role(message.role)),
                    parts: Self::message_parts(message),
                });
            }
        }

        let generation_config = request.temperature.map(|temperature| GenerationConfig {
            temperature,
            candidate_count: 1,
        });

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Join the text parts of the first candidate
    fn extract_content(response: &GeminiResponse) -> Result<String, AppError> {
        let text: String = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
                .map_or_else(String::new, |r| format!(" (blocked: {r})"));
            return Err(AppError::external_service(
                service_names::GEMINI_API,
                format!("No content in Gemini response{reason}"),
            ));
        }
        Ok(text)
    }

    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to appropriate error type
    ///
    /// Quota errors (429) keep the retry hint Gemini sends.
    fn map_api_error(status: StatusCode, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            );
        }
        map_status_error(service_names::GEMINI_API, status, &message)
    }

    /// Extract a user-friendly quota/rate limit message from Gemini error
    fn extract_quota_message(message: &str) -> String {
        const RETRY_PREFIX: &str = "Please retry in ";
        let seconds = message.find(RETRY_PREFIX).and_then(|pos| {
            let after_prefix = &message[pos + RETRY_PREFIX.len()..];
            let end = after_prefix.find('s')?;
            after_prefix[..end].parse::<f64>().ok()
        });

        seconds.map_or_else(
            || "AI service quota exceeded. Please wait a moment and try again.".to_owned(),
            |secs| {
                let secs = secs.ceil().max(1.0) as u64;
                format!("AI service quota exceeded. Please try again in {secs} seconds.")
            },
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::multimodal()
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(
        skip(self, request),
        fields(
            model = %request.model.as_deref().unwrap_or(&self.default_model),
            images = request.has_images(),
        )
    )]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let started = Instant::now();

        let result = self.generate_content(request, model).await;

        AppLogger::log_model_call(
            "generateContent",
            model,
            started.elapsed().as_millis(),
            result.is_ok(),
        );
        result
    }
}

impl GeminiProvider {
    /// One `generateContent` round trip
    async fn generate_content(
        &self,
        request: &ChatRequest,
        model: &str,
    ) -> Result<ChatResponse, AppError> {
        let url = self.build_url(model, "generateContent");
        let gemini_request = Self::build_gemini_request(request);

        debug!("Sending request to Gemini API");

        let mut builder = self.client.post(&url).json(&gemini_request);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        // Strip the URL from reqwest errors: it carries the API key
        let response = builder
            .send()
            .await
            .map_err(|e| map_transport_error(service_names::GEMINI_API, &e.without_url()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| map_transport_error(service_names::GEMINI_API, &e.without_url()))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status, &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service(
                    service_names::GEMINI_API,
                    format!("Failed to parse Gemini response: {e}"),
                )
            })?;

        if let Some(api_error) = gemini_response.error.as_ref() {
            return Err(AppError::external_service(
                service_names::GEMINI_API,
                api_error.message.clone(),
            ));
        }

        let content = Self::extract_content(&gemini_response)?;
        debug!(chars = content.len(), "Received Gemini response");

        Ok(ChatResponse {
            content,
            model: model.to_owned(),
            usage: gemini_response
                .usage_metadata
                .as_ref()
                .map(Self::convert_usage),
            finish_reason: gemini_response
                .candidates
                .as_ref()
                .and_then(|c| c.first())
                .and_then(|c| c.finish_reason.clone()),
        })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("default_model", &self.default_model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::InlineImage;

    #[test]
    fn test_request_serialization_with_image() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("You are a nutritionist"),
            ChatMessage::user_with_image(
                "Analyze",
                InlineImage::new("image/jpeg", vec![0xFF, 0xD8, 0xFF]),
            ),
        ])
        .with_temperature(0.6);

        let json = serde_json::to_value(GeminiProvider::build_gemini_request(&request)).unwrap();
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "You are a nutritionist");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Analyze");
        assert_eq!(json["contents"][0]["parts"][1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(json["contents"][0]["parts"][1]["inline_data"]["data"], "/9j/");
        assert!((json["generation_config"]["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_extract_content_joins_text_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[
            {"text":"{\"a\":"},{"text":"1}"}
        ]},"finishReason":"STOP"}]}"#;
        let response: GeminiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(GeminiProvider::extract_content(&response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_empty_candidates_is_service_error() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = GeminiProvider::extract_content(&response).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert!(err.message.contains("SAFETY"));
    }

    #[test]
    fn test_quota_message() {
        let err = GeminiProvider::map_api_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"Quota exceeded. Please retry in 6.4s."}}"#,
        );
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);
        assert!(err.message.contains("7 seconds"));

        let auth = GeminiProvider::map_api_error(StatusCode::FORBIDDEN, "{}");
        assert_eq!(auth.code, ErrorCode::ExternalAuthFailed);
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new("secret-key");
        assert!(!format!("{provider:?}").contains("secret-key"));
    }
}
