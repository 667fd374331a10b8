// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Verification command for the mealwise CLI
// ABOUTME: Reconciles a saved plan against the USDA nutrition database

use super::build_assistant;
use crate::helpers::display::display_reconciliation;
use crate::helpers::plan_file::load_plan;
use anyhow::{bail, Result};
use std::path::Path;

/// Reconcile a saved plan
pub async fn run(path: &Path) -> Result<()> {
    let plan = load_plan(path).await?;
    let assistant = build_assistant()?;
    if !assistant.lookup_enabled() {
        bail!("USDA_API_KEY is not configured; nutrition verification is unavailable");
    }

    let report = assistant.reconcile(&plan).await;
    display_reconciliation(&report);
    Ok(())
}
