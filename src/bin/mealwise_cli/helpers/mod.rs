// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Helper modules for the mealwise CLI
// ABOUTME: Terminal display formatting and plan file persistence

pub mod display;
pub mod plan_file;
