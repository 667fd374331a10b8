// ABOUTME: Unified error handling re-exported from mealwise-core
// ABOUTME: AppError, ErrorCode and AppResult used by every service and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use mealwise_core::errors::*;
