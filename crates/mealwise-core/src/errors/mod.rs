// ABOUTME: Unified error handling with standard error codes for all Mealwise components
// ABOUTME: Defines AppError, ErrorCode and the AppResult alias used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every primary flow (meal plan generation, grocery synthesis, image analysis)
//! reports failures as an [`AppError`]. The [`ErrorCode`] tells the caller which
//! class of failure occurred so a diagnostic can distinguish "the service was
//! unreachable" from "the model answered but nothing usable was found".
//!
//! Enrichment paths (nutrition lookup, reconciliation) never surface errors:
//! a database miss is an `Option::None`, not an `AppError`.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied an invalid value
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field is absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Meal plan content (4000-4999)
    /// The meal plan contains no named dishes
    #[serde(rename = "NO_DISHES_FOUND")]
    NoDishesFound = 4000,

    // External Services (5000-5999)
    /// External service answered with an error status or undecodable body
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// External service could not be reached (connect failure, timeout)
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// External service rejected our credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// External service quota or rate limit hit
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,

    // Configuration (6000-6999)
    /// Generic configuration problem
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration value (credential) is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration value is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Model output (7000-7999)
    /// No structured payload could be located in model output
    #[serde(rename = "EXTRACTION_FAILED")]
    ExtractionFailed = 7000,
    /// A payload was located but is not valid for the expected shape
    #[serde(rename = "PARSE_FAILED")]
    ParseFailed = 7001,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::NoDishesFound => "No dish names were found in the meal plan",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::ExtractionFailed => "Could not find structured data in the AI response",
            Self::ParseFailed => "Structured data in the AI response is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the failure came from talking to a remote service
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::ExternalAuthFailed
                | Self::ExternalRateLimited
        )
    }

    /// Whether the failure is a configuration problem that halts the request
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured context (e.g. a snippet of the offending model output)
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration value missing
    #[must_use]
    pub fn config_missing(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{key} is not configured"),
        )
    }

    /// Configuration value present but invalid
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// External service error (bad status, undecodable body)
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service unreachable (connect failure, timeout)
    #[must_use]
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// No structured payload found in model output
    #[must_use]
    pub fn extraction_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExtractionFailed, message)
    }

    /// Payload found but invalid
    #[must_use]
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseFailed, message)
    }

    /// Nothing to shop for
    #[must_use]
    pub fn no_dishes() -> Self {
        Self::new(
            ErrorCode::NoDishesFound,
            "No dish names found in the plan to create a grocery list",
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
