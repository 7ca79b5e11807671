use crate::models::{ActivityLevel, Goal, MacroRationale};

// ─────────────────────────────────────────────────────────────────────────────
// Mifflin-St Jeor coefficients
// ─────────────────────────────────────────────────────────────────────────────

/// kcal per kilogram of body weight.
pub const BMR_WEIGHT_COEF: f64 = 10.0;

/// kcal per centimeter of height.
pub const BMR_HEIGHT_COEF: f64 = 6.25;

/// kcal subtracted per year of age.
pub const BMR_AGE_COEF: f64 = 5.0;

/// Sex-specific constant for men.
pub const BMR_MALE_OFFSET: f64 = 5.0;

/// Sex-specific constant for women.
pub const BMR_FEMALE_OFFSET: f64 = -161.0;

// ─────────────────────────────────────────────────────────────────────────────
// Macro policy
// ─────────────────────────────────────────────────────────────────────────────

/// Protein grams per kilogram of body weight.
pub const PROTEIN_GRAMS_PER_KG: f64 = 2.0;

/// Share of target calories allocated to fat.
pub const FAT_CALORIE_SHARE: f64 = 0.30;

/// Carbohydrate allocation never drops below this many grams.
pub const CARB_FLOOR_GRAMS: f64 = 50.0;

pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;
pub const CARB_KCAL_PER_GRAM: f64 = 4.0;

/// Below this target the plan is shown with a medical-supervision notice.
pub const LOW_TARGET_NOTICE_KCAL: f64 = 1200.0;

pub const MACRO_RATIONALE: MacroRationale = MacroRationale {
    protein: "Повышен до 2г/кг для поддержки синтеза гемоглобина и предотвращения мышечной слабости при похудении.",
    fat: "30% рациона выделено на полезные жиры для стабилизации гормонального фона в период пременопаузы.",
    carbs: "Распределены для обеспечения стабильного уровня сахара в крови, чтобы минимизировать дневную усталость.",
};

// ─────────────────────────────────────────────────────────────────────────────
// Activity and goal tables
// ─────────────────────────────────────────────────────────────────────────────

/// TDEE multiplier for an activity tier.
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

/// Daily calorie adjustment for a goal.
pub fn goal_adjustment(goal: Goal) -> f64 {
    match goal {
        Goal::Maintain => 0.0,
        Goal::MildLoss => -250.0,
        Goal::WeightLoss => -500.0,
        Goal::ExtremeLoss => -1000.0,
    }
}

pub fn activity_label(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Sedentary => "Малоподвижный (сидячая работа)",
        ActivityLevel::Light => "Легкая активность (1-3 раза в неделю)",
        ActivityLevel::Moderate => "Умеренная активность (3-5 раз в неделю)",
        ActivityLevel::Active => "Высокая активность (6-7 раз в неделю)",
        ActivityLevel::VeryActive => "Экстремальная активность (тяжёлый труд)",
    }
}

pub fn goal_label(goal: Goal) -> &'static str {
    match goal {
        Goal::Maintain => "Поддержание веса",
        Goal::MildLoss => "Медленное похудение (0.25 кг/нед)",
        Goal::WeightLoss => "Обычное похудение (0.5 кг/нед)",
        Goal::ExtremeLoss => "Быстрое похудение (1 кг/нед)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_multipliers_increase_with_tier() {
        let multipliers: Vec<f64> = ActivityLevel::ALL
            .iter()
            .map(|l| activity_multiplier(*l))
            .collect();
        assert!(multipliers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_goal_adjustments_are_deficits() {
        assert_eq!(goal_adjustment(Goal::Maintain), 0.0);
        assert!(Goal::ALL.iter().all(|g| goal_adjustment(*g) <= 0.0));
    }
}
