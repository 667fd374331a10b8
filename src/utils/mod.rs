// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Shared HTTP client construction and transport error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client configuration and error mapping
pub mod http_client;
