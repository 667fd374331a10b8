// ABOUTME: Shared HTTP client utilities with timeout configuration
// ABOUTME: Maps reqwest failures and HTTP status codes onto the AppError taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, ErrorCode};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

/// Connection establishment timeout for every outbound client
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Longest error body echoed back into an error message
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Create a new HTTP client with a request timeout
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout: Duration) -> Client {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a client without a global timeout; callers set one per request
#[must_use]
pub fn create_api_client() -> Client {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Map a transport-level reqwest failure
///
/// Timeouts and connection failures mean the service was unreachable;
/// everything else (body decode, redirect loops) is a service error.
#[must_use]
pub fn map_transport_error(service: &str, error: &reqwest::Error) -> AppError {
    if error.is_timeout() {
        AppError::external_unavailable(service, "request timed out")
    } else if error.is_connect() {
        AppError::external_unavailable(service, format!("connection failed: {error}"))
    } else if error.is_decode() {
        AppError::external_service(service, format!("invalid response body: {error}"))
    } else {
        AppError::external_service(service, format!("request failed: {error}"))
    }
}

/// Map a non-success HTTP status
#[must_use]
pub fn map_status_error(service: &str, status: StatusCode, message: &str) -> AppError {
    let detail = truncate(message);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::new(
            ErrorCode::ExternalAuthFailed,
            format!("{service}: credentials rejected ({status}): {detail}"),
        ),
        StatusCode::TOO_MANY_REQUESTS => AppError::new(
            ErrorCode::ExternalRateLimited,
            format!("{service}: rate limit exceeded. Please wait a moment and try again."),
        ),
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            AppError::external_unavailable(service, format!("HTTP {status}: {detail}"))
        }
        _ => AppError::external_service(service, format!("HTTP {status}: {detail}")),
    }
}

fn truncate(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_owned();
    }
    let mut shortened: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    shortened.push_str("...");
    shortened
}
