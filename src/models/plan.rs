use serde::Serialize;

use crate::planner::constants::{CARB_KCAL_PER_GRAM, FAT_KCAL_PER_GRAM, PROTEIN_KCAL_PER_GRAM};

/// Daily macronutrient allocation in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Macros {
    pub protein_grams: f64,
    pub fat_grams: f64,
    pub carb_grams: f64,
}

/// Fixed explanations of the macro policy.
///
/// These document the policy, they are not derived from the computed numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroRationale {
    pub protein: &'static str,
    pub fat: &'static str,
    pub carbs: &'static str,
}

/// Energy and macronutrient plan derived from a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Basal metabolic rate, kcal/day.
    pub bmr: f64,

    /// Total daily energy expenditure, kcal/day.
    pub tdee: f64,

    /// TDEE adjusted for the goal, kcal/day. Not floored.
    pub target_calories: f64,

    pub macros: Macros,

    pub macro_rationale: MacroRationale,

    /// True when the carbohydrate remainder fell below the minimum and was clamped.
    pub carb_floor_applied: bool,
}

impl CalculationResult {
    /// Calories implied by the macro allocation.
    ///
    /// Exceeds `target_calories` when the carbohydrate floor is engaged.
    pub fn macro_calories(&self) -> f64 {
        self.macros.protein_grams * PROTEIN_KCAL_PER_GRAM
            + self.macros.fat_grams * FAT_KCAL_PER_GRAM
            + self.macros.carb_grams * CARB_KCAL_PER_GRAM
    }
}
