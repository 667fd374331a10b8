// ABOUTME: LLM provider abstraction layer for generative text and vision calls
// ABOUTME: Defines the provider contract, capability flags and chat request/response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! Every model call made by the meal plan requester, grocery synthesizer and
//! image analyzer goes through [`LlmProvider::complete`]. Services never build
//! HTTP requests themselves, so tests can swap in a scripted provider.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mealwise::llm::{ChatMessage, ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new(vec![ChatMessage::user("Suggest a breakfast")])
//!         .with_temperature(0.6);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider accepts inline image parts
        const VISION = 0b0000_0001;
    }
}

impl LlmCapabilities {
    /// Text-only provider
    #[must_use]
    pub const fn text_only() -> Self {
        Self::empty()
    }

    /// Text and vision provider (Gemini flash models)
    #[must_use]
    pub const fn multimodal() -> Self {
        Self::VISION
    }

    /// Check if vision is supported
    #[must_use]
    pub const fn supports_vision(&self) -> bool {
        self.contains(Self::VISION)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

/// Raw image attached to a user message
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Undecoded image bytes
    pub data: Vec<u8>,
}

impl InlineImage {
    /// Wrap image bytes
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Standard base64 encoding of the bytes, as sent on the wire
    #[must_use]
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }
}

impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Text content of the message
    pub content: String,
    /// Images sent after the text
    pub images: Vec<InlineImage>,
}

impl ChatMessage {
    /// Create a new text message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Create a user message carrying one image
    #[must_use]
    pub fn user_with_image(content: impl Into<String>, image: InlineImage) -> Self {
        Self {
            images: vec![image],
            ..Self::user(content)
        }
    }

    /// Whether this message needs a vision-capable provider
    #[must_use]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier override
    pub model: Option<String>,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Per-call timeout
    pub timeout: Option<Duration>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            timeout: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the per-call timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether any message carries an image
    #[must_use]
    pub fn has_images(&self) -> bool {
        self.messages.iter().any(ChatMessage::has_images)
    }
}

/// Response from a completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (STOP, MAX_TOKENS, ...)
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Generative model provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name, used in error messages
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a single request/response completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}
