use std::sync::LazyLock;

use regex::Regex;

use crate::advice::{AdviceUnavailable, UnavailableReason};
use crate::models::AIAdvice;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n?(.*?)```").expect("fenced block regex is valid")
});

/// Extract structured advice from backend text.
///
/// Tries, in order: the whole text as JSON, each fenced code block, then each
/// balanced `{...}` span embedded in prose. The first candidate that has the
/// advice shape wins.
pub fn parse_advice(text: &str) -> Result<AIAdvice, AdviceUnavailable> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AdviceUnavailable::new(
            UnavailableReason::Malformed,
            "empty response",
        ));
    }

    let mut last_error = String::from("no JSON object found");

    let fenced = FENCED_BLOCK
        .captures_iter(trimmed)
        .filter_map(|c| c.get(1).map(|m| m.as_str().trim()));
    let candidates = std::iter::once(trimmed)
        .chain(fenced)
        .chain(object_spans(trimmed));

    for candidate in candidates {
        match parse_candidate(candidate) {
            Ok(advice) => return Ok(advice),
            Err(e) => last_error = e,
        }
    }

    Err(AdviceUnavailable::new(UnavailableReason::Malformed, last_error))
}

fn parse_candidate(candidate: &str) -> Result<AIAdvice, String> {
    let advice: AIAdvice = serde_json::from_str(candidate).map_err(|e| e.to_string())?;
    validate(advice)
}

/// Enforce the value constraints serde cannot express.
fn validate(mut advice: AIAdvice) -> Result<AIAdvice, String> {
    advice.warning = advice
        .warning
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty());

    for day in advice.weekly_menu.iter().flatten() {
        for meal in &day.meals {
            if !(meal.calories.is_finite() && meal.calories >= 0.0) {
                return Err(format!(
                    "day {} meal '{}' has invalid calories {}",
                    day.day, meal.dish, meal.calories
                ));
            }
        }
    }

    Ok(advice)
}

/// Balanced `{...}` spans of `text`, outermost first, skipping braces in strings.
fn object_spans(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut start = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if depth > 0 => in_string = true,
            b'{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        spans.push(&text[s..=i]);
                    }
                }
            }
            _ => {}
        }
    }

    spans.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let advice = parse_advice(r#"{"tips": ["Пейте воду", "Спите 8 часов"]}"#).unwrap();
        assert_eq!(advice.tips, vec!["Пейте воду", "Спите 8 часов"]);
        assert_eq!(advice.warning, None);
        assert_eq!(advice.weekly_menu, None);
    }

    #[test]
    fn test_parse_fenced_block() {
        let text = "Вот ваш план:\n```json\n{\"tips\": [\"a\"], \"warning\": \"Проконсультируйтесь с врачом\"}\n```\nУдачи!";
        let advice = parse_advice(text).unwrap();
        assert_eq!(advice.tips, vec!["a"]);
        assert_eq!(advice.warning.as_deref(), Some("Проконсультируйтесь с врачом"));
    }

    #[test]
    fn test_parse_object_embedded_in_prose() {
        let text = r#"Sure! {"note": "ignore me"} and then {"tips": ["b {not a brace}"], "weeklyMenu": [{"day": 1, "meals": [{"time": "08:00", "dish": "Каша", "calories": 320}]}]} done"#;
        let advice = parse_advice(text).unwrap();
        assert_eq!(advice.tips, vec!["b {not a brace}"]);
        let menu = advice.weekly_menu.unwrap();
        assert_eq!(menu[0].day, 1);
        assert_eq!(menu[0].meals[0].dish, "Каша");
    }

    #[test]
    fn test_blank_warning_is_absent() {
        let advice = parse_advice(r#"{"tips": [], "warning": "   "}"#).unwrap();
        assert_eq!(advice.warning, None);
    }

    #[test]
    fn test_rejects_free_text() {
        let err = parse_advice("Ешьте больше овощей и меньше сахара.").unwrap_err();
        assert_eq!(err.reason, UnavailableReason::Malformed);
    }

    #[test]
    fn test_rejects_missing_tips() {
        let err = parse_advice(r#"{"warning": "x"}"#).unwrap_err();
        assert_eq!(err.reason, UnavailableReason::Malformed);
    }

    #[test]
    fn test_rejects_non_string_tips() {
        assert!(parse_advice(r#"{"tips": [1, 2]}"#).is_err());
    }

    #[test]
    fn test_rejects_array_shape() {
        assert!(parse_advice(r#"["tip one", "tip two"]"#).is_err());
    }

    #[test]
    fn test_rejects_negative_meal_calories() {
        let text = r#"{"tips": ["a"], "weeklyMenu": [{"day": 1, "meals": [{"time": "08:00", "dish": "x", "calories": -5}]}]}"#;
        assert!(parse_advice(text).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(parse_advice("   ").is_err());
    }
}
