use crate::models::{AIAdvice, CalculationResult, Profile};
use crate::planner::constants::{
    CARB_FLOOR_GRAMS, LOW_TARGET_NOTICE_KCAL, activity_label, goal_label,
};
use crate::state::AdviceState;

/// Display a short profile summary.
pub fn display_profile(profile: &Profile) {
    println!();
    println!("=== Profile ===");
    println!(
        "{} y/o {}, {} kg, {} cm",
        profile.age, profile.gender, profile.weight, profile.height
    );
    println!("Activity: {}", activity_label(profile.activity_level));
    println!("Goal:     {}", goal_label(profile.goal));
}

/// Display the numeric plan with its rationale.
pub fn display_plan(result: &CalculationResult) {
    println!();
    println!("=== Energy ===");
    println!();
    println!("  BMR:             {:>6.0} kcal", result.bmr);
    println!("  TDEE:            {:>6.0} kcal", result.tdee);
    println!("  Target calories: {:>6.0} kcal", result.target_calories);

    println!();
    println!("=== Macros ===");
    println!();
    println!(
        "  Protein: {:>5.0} g  {}",
        result.macros.protein_grams, result.macro_rationale.protein
    );
    println!(
        "  Fat:     {:>5.0} g  {}",
        result.macros.fat_grams, result.macro_rationale.fat
    );
    println!(
        "  Carbs:   {:>5.0} g  {}",
        result.macros.carb_grams, result.macro_rationale.carbs
    );

    if result.carb_floor_applied {
        println!();
        println!(
            "  Note: carbohydrates held at the {:.0} g minimum; macros total {:.0} kcal.",
            CARB_FLOOR_GRAMS,
            result.macro_calories()
        );
    }

    if result.target_calories < LOW_TARGET_NOTICE_KCAL {
        println!();
        println!(
            "  Warning: a target below {:.0} kcal should only be followed under medical supervision.",
            LOW_TARGET_NOTICE_KCAL
        );
    }
    println!();
}

/// Display the advice section for any advice state.
pub fn display_advice_state(state: &AdviceState) {
    match state {
        AdviceState::NotRequested => {}
        AdviceState::Loading => println!("Preparing personal advice..."),
        AdviceState::Ready(advice) => display_advice(advice),
        AdviceState::Unavailable(e) => {
            println!("=== Advice ===");
            println!();
            println!("Advice is not available right now ({}).", e.reason);
            println!("The calculated plan above is complete on its own.");
            println!();
        }
    }
}

/// Display tips, warning and weekly menu.
pub fn display_advice(advice: &AIAdvice) {
    println!("=== Advice ===");
    println!();

    if let Some(warning) = &advice.warning {
        println!("  !! {}", warning);
        println!();
    }

    for (i, tip) in advice.tips.iter().enumerate() {
        println!("{:>3}. {}", i + 1, tip);
    }

    if let Some(menu) = &advice.weekly_menu {
        println!();
        println!("=== Weekly Menu ===");

        let totals = advice.daily_menu_calories();
        for (day, (_, total)) in menu.iter().zip(totals) {
            println!();
            println!("Day {} ({:.0} kcal)", day.day, total);
            let max_time_len = day.meals.iter().map(|m| m.time.len()).max().unwrap_or(5);
            for meal in &day.meals {
                println!(
                    "  {:<width$}  {:>4.0} kcal  {}",
                    meal.time,
                    meal.calories,
                    meal.dish,
                    width = max_time_len
                );
            }
        }
    }
    println!();
}
