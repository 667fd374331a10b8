// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for the mealwise CLI
// ABOUTME: Plain-text tables for plans, totals, reconciliation, grocery lists and photo analysis

use mealwise::errors::{AppError, ErrorCode};
use mealwise::intelligence::CalorieTarget;
use mealwise::models::{
    FoodImageAnalysis, GroceryList, MealPlan, NutritionSource, NutritionVector,
    ReconciliationReport, UserProfile,
};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('~');
    short
}

fn totals_line(totals: &NutritionVector) -> String {
    format!(
        "{:.0} kcal | Protein {:.1} g | Carbs {:.1} g | Fat {:.1} g",
        totals.calories, totals.protein, totals.carbs, totals.fat
    )
}

/// Display the calorie target breakdown
pub fn display_calorie_target(profile: &UserProfile, target: &CalorieTarget) {
    println!("\nDaily Calorie Target");
    println!("{}", rule());
    println!(
        "   Profile: {} y, {} kg, {} cm, {}",
        profile.age, profile.weight_kg, profile.height_cm, profile.sex
    );
    println!("   Activity: {}", profile.activity);
    println!("   Goal: {}", profile.goal);
    println!("   BMR (Mifflin-St Jeor): {:.0} kcal", target.bmr);
    println!("   TDEE: {:.0} kcal", target.tdee);
    println!("   Goal adjustment: {:+.0} kcal", target.adjustment);
    println!("   Target: {} kcal/day", target.target_kcal);
}

/// Display every day of the plan as a table
pub fn display_meal_plan(plan: &MealPlan) {
    println!("\n{}-Day Meal Plan", plan.len());
    for day in &plan.days {
        println!("\n{}", day.label);
        println!("{}", rule());
        println!(
            "{:<10} {:<30} {:>7} {:>6} {:>7} {:>6} {:>6}",
            "Meal", "Dish", "Portion", "kcal", "Protein", "Carbs", "Fat"
        );
        for (slot, dish) in day.named_dishes() {
            let n = &dish.nutrition;
            println!(
                "{:<10} {:<30} {:>5.0} g {:>6.0} {:>7.1} {:>6.1} {:>6.1}",
                slot.to_string(),
                truncate(dish.name().unwrap_or_default(), 30),
                dish.portion_grams,
                n.calories,
                n.protein,
                n.carbs,
                n.fat
            );
        }

        let totals = day.totals();
        println!("Daily total: {}", totals_line(&totals));

        let (protein_kcal, carbs_kcal, fat_kcal) = totals.macro_energy();
        let macro_kcal = protein_kcal + carbs_kcal + fat_kcal;
        if macro_kcal > 0.0 {
            println!(
                "Macro split: protein {:.0}% / carbs {:.0}% / fat {:.0}%",
                protein_kcal / macro_kcal * 100.0,
                carbs_kcal / macro_kcal * 100.0,
                fat_kcal / macro_kcal * 100.0
            );
        }
    }
}

/// Display the per-day totals table
pub fn display_weekly_summary(plan: &MealPlan) {
    println!("\nWeekly Nutrition Overview");
    println!("{}", rule());
    println!(
        "{:<12} {:>8} {:>9} {:>9} {:>8}",
        "Day", "kcal", "Protein", "Carbs", "Fat"
    );
    for summary in plan.weekly_summary() {
        let t = &summary.totals;
        println!(
            "{:<12} {:>8.0} {:>9.1} {:>9.1} {:>8.1}",
            truncate(&summary.label, 12),
            t.calories,
            t.protein,
            t.carbs,
            t.fat
        );
    }
    println!("Week total: {}", totals_line(&plan.totals()));
}

/// Display a reconciliation report
pub fn display_reconciliation(report: &ReconciliationReport) {
    println!("\nNutrition Verification (USDA FoodData Central)");
    println!("{}", rule());
    println!(
        "   Verified {} of {} dishes ({:.0}%)",
        report.verified_dishes,
        report.total_dishes,
        report.verification_rate() * 100.0
    );

    if report.is_consistent() {
        println!("   No verified dish deviates beyond tolerance");
        return;
    }

    println!("   Dishes with deviating macros:");
    for dish in &report.discrepancies {
        println!("\n   {} ({}, {})", dish.dish, dish.day, dish.slot);
        for m in &dish.macros {
            println!(
                "      {:<9} plan {:>8.1}  reference {:>8.1}  variance {:+.1}%",
                m.nutrient.to_string(),
                m.generated,
                m.reference,
                m.variance_percent
            );
        }
    }
}

/// Display a grocery list
pub fn display_grocery_list(list: &GroceryList) {
    println!("\nWeekly Grocery List ({} dishes)", list.dishes.len());
    println!("{}", rule());
    println!("{}", list.markdown);
    println!("\nNote: This is an automatically generated estimate.");
}

/// Display a food photo analysis
pub fn display_food_analysis(analysis: &FoodImageAnalysis) {
    println!("\nFood Photo Analysis");
    println!("{}", rule());
    println!(
        "   Food: {}",
        analysis.food.as_deref().unwrap_or("Not recognized")
    );
    println!("   Portion: {:.0} g", analysis.portion_grams);
    println!(
        "   Model estimate: {}",
        totals_line(&analysis.estimated_nutrition())
    );

    match (&analysis.data_source, &analysis.verified_nutrition) {
        (NutritionSource::Database, Some(verified)) => {
            println!("   USDA verified: {}", totals_line(verified));
            println!("   Source: USDA FoodData Central");
        }
        _ => println!("   Source: AI Estimate"),
    }
}

/// Print a failure with its error class
pub fn print_error(error: &anyhow::Error) {
    let Some(app_error) = error.downcast_ref::<AppError>() else {
        eprintln!("Error: {error:#}");
        return;
    };

    eprintln!("Error: {app_error}");
    if app_error.code.is_configuration() {
        eprintln!("Hint: set GEMINI_API_KEY (and optionally USDA_API_KEY) in the environment");
        return;
    }
    match app_error.code {
        ErrorCode::ExternalRateLimited => {
            eprintln!("Hint: the service is rate limiting requests; wait and retry");
        }
        ErrorCode::ExternalServiceUnavailable => {
            eprintln!("Hint: check your network connection and retry");
        }
        ErrorCode::ExtractionFailed | ErrorCode::ParseFailed => {
            eprintln!("Hint: the model reply was not usable; retrying usually helps");
        }
        code if code.is_transport() => {
            eprintln!("Hint: the remote service rejected the request; check your API keys");
        }
        _ => {}
    }
}
