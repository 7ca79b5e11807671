use serde::{Deserialize, Serialize};

/// A single meal in a generated menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub time: String,
    pub dish: String,
    pub calories: f64,
}

/// One day of a generated weekly menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMenu {
    pub day: u32,
    pub meals: Vec<Meal>,
}

/// Narrative advice returned by the generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIAdvice {
    /// Display order is significant.
    pub tips: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_menu: Option<Vec<DayMenu>>,
}

impl AIAdvice {
    /// Total calories of each menu day, in menu order.
    pub fn daily_menu_calories(&self) -> Vec<(u32, f64)> {
        self.weekly_menu
            .iter()
            .flatten()
            .map(|d| (d.day, d.meals.iter().map(|m| m.calories).sum()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_menu_calories() {
        let advice = AIAdvice {
            tips: vec![],
            warning: None,
            weekly_menu: Some(vec![DayMenu {
                day: 1,
                meals: vec![
                    Meal {
                        time: "08:00".to_string(),
                        dish: "Oatmeal".to_string(),
                        calories: 350.0,
                    },
                    Meal {
                        time: "13:00".to_string(),
                        dish: "Soup".to_string(),
                        calories: 450.0,
                    },
                ],
            }]),
        };

        assert_eq!(advice.daily_menu_calories(), vec![(1, 800.0)]);
    }

    #[test]
    fn test_daily_menu_calories_without_menu() {
        let advice = AIAdvice {
            tips: vec!["Drink water".to_string()],
            warning: None,
            weekly_menu: None,
        };
        assert!(advice.daily_menu_calories().is_empty());
    }
}
