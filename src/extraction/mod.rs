// ABOUTME: Response extractor turning free-form model text into structured payloads
// ABOUTME: Exposes fence helpers, JSON extraction modes and the extraction error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Response Extraction
//!
//! Generative models wrap their answers in prose and markdown fences even
//! when asked not to. This module recovers the payload:
//!
//! 1. a ```` ```json ```` fenced block whose body starts with `{`, else
//! 2. the whole trimmed text when it is an object ([`ExtractionMode::Strict`]),
//!    or the first brace-balanced object inside it ([`ExtractionMode::Lenient`]).
//!
//! Extraction never panics. A missing payload and an unparsable payload
//! map to different [`ErrorCode`]s so callers can tell them apart.

/// Markdown fence primitives
pub mod fence;
mod json;

pub use fence::{fenced_block, strip_fence};
pub use json::{extract_json, extract_json_as};

use crate::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// How far the extractor searches outside a fenced block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Only a response that is itself a JSON object
    Strict,
    /// Any brace-balanced object within the response
    #[default]
    Lenient,
}

/// Failure to recover structured data from model output
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// No JSON object candidate was present
    #[error("no JSON object found in the model response")]
    NotFound,
    /// A candidate was located but is not valid JSON
    #[error("model response contains malformed JSON: {source}")]
    InvalidJson {
        /// Start of the offending candidate
        snippet: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },
    /// Valid JSON that does not have the expected shape
    #[error("model response JSON is not a valid {target}: {source}")]
    Mismatch {
        /// Short name of the expected type
        target: &'static str,
        /// Deserialization error
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractionError {
    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound => ErrorCode::ExtractionFailed,
            Self::InvalidJson { .. } | Self::Mismatch { .. } => ErrorCode::ParseFailed,
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(error: ExtractionError) -> Self {
        let code = error.code();
        let message = error.to_string();
        match error {
            ExtractionError::NotFound => Self::new(code, message),
            ExtractionError::InvalidJson { snippet, source } => Self::new(code, message)
                .with_details(json!({ "snippet": snippet }))
                .with_source(source),
            ExtractionError::Mismatch { target, source } => Self::new(code, message)
                .with_details(json!({ "expected": target }))
                .with_source(source),
        }
    }
}
