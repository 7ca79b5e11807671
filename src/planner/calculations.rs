use crate::error::{DietError, Result};
use crate::models::{CalculationResult, Gender, Macros, Profile};
use crate::planner::constants::*;

/// Basal metabolic rate (Mifflin-St Jeor), kcal/day.
pub fn calculate_bmr(profile: &Profile) -> f64 {
    let base = BMR_WEIGHT_COEF * profile.weight + BMR_HEIGHT_COEF * profile.height
        - BMR_AGE_COEF * profile.age as f64;

    match profile.gender {
        Gender::Male => base + BMR_MALE_OFFSET,
        Gender::Female => base + BMR_FEMALE_OFFSET,
    }
}

/// Macro split for a body weight and calorie target.
///
/// Returns the macros and whether the carbohydrate floor was applied.
pub fn calculate_macros(weight: f64, target_calories: f64) -> (Macros, bool) {
    let protein = weight * PROTEIN_GRAMS_PER_KG;
    let protein_cal = protein * PROTEIN_KCAL_PER_GRAM;

    let fat_cal = target_calories * FAT_CALORIE_SHARE;
    let fat = fat_cal / FAT_KCAL_PER_GRAM;

    // May go negative for small targets; the floor catches it.
    let carb_cal = target_calories - protein_cal - fat_cal;
    let remainder = carb_cal / CARB_KCAL_PER_GRAM;
    let carbs = remainder.max(CARB_FLOOR_GRAMS);

    (
        Macros {
            protein_grams: protein,
            fat_grams: fat,
            carb_grams: carbs,
        },
        remainder < CARB_FLOOR_GRAMS,
    )
}

/// Derive the energy and macronutrient plan for a profile.
///
/// Health signals are never read here. Profiles whose BMR or calorie target
/// is not positive are rejected; the target is never clamped.
pub fn compute(profile: &Profile) -> Result<CalculationResult> {
    profile.validate()?;

    let bmr = calculate_bmr(profile);
    if !(bmr.is_finite() && bmr > 0.0) {
        return Err(DietError::InvalidProfile(format!(
            "basal metabolic rate is not positive ({:.1} kcal)",
            bmr
        )));
    }

    let tdee = bmr * activity_multiplier(profile.activity_level);
    let target_calories = tdee + goal_adjustment(profile.goal);
    if !(target_calories.is_finite() && target_calories > 0.0) {
        return Err(DietError::InvalidProfile(format!(
            "calorie target for {} is not positive ({:.1} kcal)",
            profile.goal, target_calories
        )));
    }
    let (macros, carb_floor_applied) = calculate_macros(profile.weight, target_calories);

    Ok(CalculationResult {
        bmr,
        tdee,
        target_calories,
        macros,
        macro_rationale: MACRO_RATIONALE,
        carb_floor_applied,
    })
}
