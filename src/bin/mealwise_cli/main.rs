// ABOUTME: Mealwise CLI - command-line front end for the meal planning assistant
// ABOUTME: Calorie targets, plan generation, verification, grocery lists and photo analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Daily calorie target
//! mealwise target --age 34 --weight 82 --height 181 --activity active --goal lose-weight
//!
//! # Generate a plan, save it, verify it and build the grocery list
//! mealwise plan --goal gain-muscle --restriction vegetarian --output plan.json --verify --grocery
//!
//! # Work on a saved plan
//! mealwise verify --plan plan.json
//! mealwise grocery --plan plan.json --language Italian
//!
//! # Analyze a food photo
//! mealwise analyze-image lunch.jpg --language French
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mealwise::constants::defaults;
use mealwise::logging::LoggingConfig;
use mealwise::models::{ActivityLevel, BiologicalSex, Goal, MealPreferences, UserProfile};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "mealwise",
    about = "Mealwise meal planning assistant",
    long_about = "Generate 7-day meal plans, verify their nutrition against USDA FoodData Central, build grocery lists and analyze food photos."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print BMR, TDEE and the daily calorie target for a profile
    Target {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Generate a 7-day meal plan
    Plan {
        #[command(flatten)]
        profile: ProfileArgs,

        #[command(flatten)]
        preferences: PreferenceArgs,

        /// Use this daily calorie target instead of computing one
        #[arg(long)]
        calories: Option<u32>,

        /// Save the plan as JSON
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Cross-check the plan against the nutrition database
        #[arg(long)]
        verify: bool,

        /// Also build the grocery list
        #[arg(long)]
        grocery: bool,

        /// Language for grocery items
        #[arg(long, default_value = defaults::LANGUAGE)]
        language: String,
    },

    /// Verify a saved plan against the nutrition database
    Verify {
        /// Plan file written by `plan --output`
        #[arg(long)]
        plan: PathBuf,
    },

    /// Build the grocery list for a saved plan
    Grocery {
        /// Plan file written by `plan --output`
        #[arg(long)]
        plan: PathBuf,

        /// Language for grocery items
        #[arg(long, default_value = defaults::LANGUAGE)]
        language: String,
    },

    /// Estimate the nutrition of a food photo
    AnalyzeImage {
        /// Image file (JPEG, PNG or WebP)
        path: PathBuf,

        /// Language for the food label
        #[arg(long, default_value = defaults::LANGUAGE)]
        language: String,
    },
}

/// Biophysical profile flags
#[derive(Args)]
struct ProfileArgs {
    /// Age in years
    #[arg(long, default_value_t = 30)]
    age: u32,

    /// Weight in kilograms
    #[arg(long, default_value_t = 70.0)]
    weight: f64,

    /// Height in centimeters
    #[arg(long, default_value_t = 170.0)]
    height: f64,

    /// Biological sex (male, female)
    #[arg(long, default_value = "male")]
    sex: BiologicalSex,

    /// Activity level (sedentary, light, moderate, active, very-active)
    #[arg(long, default_value = "moderate")]
    activity: ActivityLevel,

    /// Goal (lose-weight, maintain-weight, gain-muscle)
    #[arg(long, default_value = "maintain-weight")]
    goal: Goal,
}

impl ProfileArgs {
    const fn to_profile(&self) -> UserProfile {
        UserProfile {
            age: self.age,
            weight_kg: self.weight,
            height_cm: self.height,
            sex: self.sex,
            activity: self.activity,
            goal: self.goal,
        }
    }
}

/// Dietary preference flags
#[derive(Args)]
struct PreferenceArgs {
    /// Dietary restriction (repeatable), e.g. Vegetarian, Gluten-Free
    #[arg(long = "restriction")]
    restrictions: Vec<String>,

    /// Favorite foods, comma separated
    #[arg(long, default_value = "")]
    favorites: String,

    /// Disliked foods, comma separated
    #[arg(long, default_value = "")]
    dislikes: String,
}

impl PreferenceArgs {
    fn to_preferences(&self, goal: Goal) -> MealPreferences {
        self.restrictions
            .iter()
            .fold(MealPreferences::for_goal(goal), |prefs, restriction| {
                prefs.with_restriction(restriction.as_str())
            })
            .with_favorites(self.favorites.as_str())
            .with_dislikes(self.dislikes.as_str())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().verbose(cli.verbose).init() {
        eprintln!("Warning: logging setup failed: {e}");
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            helpers::display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Target { profile } => commands::target::run(&profile.to_profile()),
        Command::Plan {
            profile,
            preferences,
            calories,
            output,
            verify,
            grocery,
            language,
        } => {
            let prefs = preferences.to_preferences(profile.goal);
            commands::plan::run(commands::plan::PlanOptions {
                profile: profile.to_profile(),
                preferences: prefs,
                calories,
                output,
                verify,
                grocery,
                language,
            })
            .await
        }
        Command::Verify { plan } => commands::verify::run(&plan).await,
        Command::Grocery { plan, language } => commands::grocery::run(&plan, &language).await,
        Command::AnalyzeImage { path, language } => {
            commands::analyze_image::run(&path, &language).await
        }
    }
}
