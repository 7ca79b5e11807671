use crate::models::{CalculationResult, Gender, Profile};
use crate::planner::constants::{activity_label, goal_label};

/// Role description sent as the system instruction.
pub const SYSTEM_INSTRUCTION: &str = "Ты опытный диетолог-нутрициолог. Отвечай только на русском языке. \
Учитывай показатели здоровья пользователя, но не ставь диагнозов и рекомендуй консультацию врача при отклонениях.";

/// Shape the backend has to answer with.
pub const RESPONSE_SHAPE: &str = r#"{
  "tips": ["строка", "..."],
  "warning": "строка (необязательно)",
  "weeklyMenu": [
    {"day": 1, "meals": [{"time": "08:00", "dish": "строка", "calories": 350}]}
  ]
}"#;

/// Number of days requested for the weekly menu.
pub const MENU_DAYS: u32 = 7;

/// Build the user prompt for a profile and its computed plan.
///
/// Health signals appear only when present.
pub fn build_prompt(profile: &Profile, result: &CalculationResult) -> String {
    let gender = match profile.gender {
        Gender::Male => "мужской",
        Gender::Female => "женский",
    };

    let mut lines = vec![
        "Профиль пользователя:".to_string(),
        format!("- Возраст: {} лет", profile.age),
        format!("- Пол: {}", gender),
        format!("- Вес: {} кг", profile.weight),
        format!("- Рост: {} см", profile.height),
        format!("- Активность: {}", activity_label(profile.activity_level)),
        format!("- Цель: {}", goal_label(profile.goal)),
    ];

    let health = &profile.health;
    if !health.is_empty() {
        lines.push(String::new());
        lines.push("Показатели здоровья:".to_string());
        let signals = [
            ("Гормональный статус", &health.hormonal_status),
            ("Утомляемость", &health.fatigue),
            ("Гемоглобин", &health.hemoglobin_level),
            ("Давление", &health.blood_pressure),
        ];
        for (label, value) in signals {
            if let Some(v) = value {
                lines.push(format!("- {}: {}", label, v));
            }
        }
    }

    let context = serde_json::json!({ "profile": profile, "results": result });
    lines.extend([
        String::new(),
        "Расчёт:".to_string(),
        format!("- BMR: {:.0} ккал", result.bmr),
        format!("- TDEE: {:.0} ккал", result.tdee),
        format!("- Целевая калорийность: {:.0} ккал", result.target_calories),
        format!(
            "- БЖУ: белки {:.0} г, жиры {:.0} г, углеводы {:.0} г",
            result.macros.protein_grams, result.macros.fat_grams, result.macros.carb_grams
        ),
        String::new(),
        "Структурированные данные:".to_string(),
        context.to_string(),
        String::new(),
        format!(
            "Дай практические советы по питанию с учётом показателей здоровья, при необходимости \
             предупреждение, и меню на {} дней, близкое к {:.0} ккал в день.",
            MENU_DAYS, result.target_calories
        ),
        "Ответь строго одним JSON-объектом без пояснений в формате:".to_string(),
        RESPONSE_SHAPE.to_string(),
    ]);

    lines.join("\n")
}
