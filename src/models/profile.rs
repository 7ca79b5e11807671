use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{DietError, Result};

/// Biological sex used by the Mifflin-St Jeor equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

/// Activity tiers, ordered from least to most active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

/// Weight goals, ordered by the size of the calorie deficit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Goal {
    Maintain,
    MildLoss,
    WeightLoss,
    ExtremeLoss,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn code(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "SEDENTARY",
            ActivityLevel::Light => "LIGHT",
            ActivityLevel::Moderate => "MODERATE",
            ActivityLevel::Active => "ACTIVE",
            ActivityLevel::VeryActive => "VERY_ACTIVE",
        }
    }
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::Maintain,
        Goal::MildLoss,
        Goal::WeightLoss,
        Goal::ExtremeLoss,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Goal::Maintain => "MAINTAIN",
            Goal::MildLoss => "MILD_LOSS",
            Goal::WeightLoss => "WEIGHT_LOSS",
            Goal::ExtremeLoss => "EXTREME_LOSS",
        }
    }
}

/// Normalize free text to an enum code: trimmed, uppercase, `-` and spaces as `_`.
fn normalize_code(input: &str) -> String {
    input
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Match `input` against a closed set of codes.
///
/// On failure the error names the closest code when it is similar enough.
fn parse_closed<T: Copy>(kind: &str, input: &str, all: &[T], code: fn(T) -> &'static str) -> Result<T> {
    let wanted = normalize_code(input);
    if let Some(value) = all.iter().copied().find(|v| code(*v) == wanted) {
        return Ok(value);
    }

    let closest = all
        .iter()
        .map(|v| (code(*v), jaro_winkler(code(*v), &wanted)))
        .filter(|(_, score)| *score > 0.7)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let hint = match closest {
        Some((name, _)) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    };

    Err(DietError::InvalidProfile(format!(
        "unknown {} '{}'{}",
        kind,
        input.trim(),
        hint
    )))
}

impl FromStr for Gender {
    type Err = DietError;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("gender", s, &Gender::ALL, Gender::code)
    }
}

impl FromStr for ActivityLevel {
    type Err = DietError;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("activity level", s, &ActivityLevel::ALL, ActivityLevel::code)
    }
}

impl FromStr for Goal {
    type Err = DietError;

    fn from_str(s: &str) -> Result<Self> {
        parse_closed("goal", s, &Goal::ALL, Goal::code)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Optional free-text health signals.
///
/// These only travel to the advice generator; the energy calculation never reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSignals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hormonal_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue: Option<String>,

    #[serde(default, alias = "hemoglobin", skip_serializing_if = "Option::is_none")]
    pub hemoglobin_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
}

impl HealthSignals {
    /// Drop blank values so that "" and absence mean the same thing.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            hormonal_status: clean(self.hormonal_status),
            fatigue: clean(self.fatigue),
            hemoglobin_level: clean(self.hemoglobin_level),
            blood_pressure: clean(self.blood_pressure),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hormonal_status.is_none()
            && self.fatigue.is_none()
            && self.hemoglobin_level.is_none()
            && self.blood_pressure.is_none()
    }
}

/// A user's biometric and lifestyle inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Age in years.
    pub age: u32,

    pub gender: Gender,

    /// Body weight in kilograms.
    pub weight: f64,

    /// Height in centimeters.
    pub height: f64,

    #[serde(alias = "activity")]
    pub activity_level: ActivityLevel,

    pub goal: Goal,

    #[serde(flatten)]
    pub health: HealthSignals,
}

impl Default for Profile {
    /// Starting values offered by the interactive form.
    fn default() -> Self {
        Self {
            age: 51,
            gender: Gender::Female,
            weight: 70.0,
            height: 174.0,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::WeightLoss,
            health: HealthSignals {
                hormonal_status: Some("пременопауза".to_string()),
                fatigue: Some("высокая".to_string()),
                hemoglobin_level: Some("низкий".to_string()),
                blood_pressure: Some("100/65".to_string()),
            },
        }
    }
}

impl Profile {
    /// Build a profile and check its numeric invariants.
    pub fn new(
        age: u32,
        gender: Gender,
        weight: f64,
        height: f64,
        activity_level: ActivityLevel,
        goal: Goal,
        health: HealthSignals,
    ) -> Result<Self> {
        let profile = Self {
            age,
            gender,
            weight,
            height,
            activity_level,
            goal,
            health: health.normalized(),
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Reject non-positive or non-finite age, weight and height.
    pub fn validate(&self) -> Result<()> {
        if self.age == 0 {
            return Err(DietError::InvalidProfile(
                "age must be a positive number of years".to_string(),
            ));
        }
        if !(self.weight.is_finite() && self.weight > 0.0) {
            return Err(DietError::InvalidProfile(format!(
                "weight must be a positive number of kilograms, got {}",
                self.weight
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(DietError::InvalidProfile(format!(
                "height must be a positive number of centimeters, got {}",
                self.height
            )));
        }
        Ok(())
    }

    /// Parse and validate a profile from JSON text.
    ///
    /// Shape errors (unknown enum values, negative numbers, missing keys) are
    /// reported as invalid profiles rather than generic JSON failures.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut profile: Profile =
            serde_json::from_str(json).map_err(|e| DietError::InvalidProfile(e.to_string()))?;
        profile.health = profile.health.normalized();
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            age: 51,
            gender: Gender::Female,
            weight: 70.0,
            height: 174.0,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::WeightLoss,
            health: HealthSignals::default(),
        }
    }

    #[test]
    fn test_validate_accepts_positive_values() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_age() {
        let mut profile = sample_profile();
        profile.age = 0;
        assert!(matches!(profile.validate(), Err(DietError::InvalidProfile(_))));
    }

    #[test]
    fn test_validate_rejects_bad_weight_and_height() {
        let mut profile = sample_profile();
        profile.weight = -3.0;
        assert!(profile.validate().is_err());

        let mut profile = sample_profile();
        profile.height = 0.0;
        assert!(profile.validate().is_err());

        let mut profile = sample_profile();
        profile.weight = f64::NAN;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_enum_parsing_is_lenient_about_case_and_separators() {
        assert_eq!("very active".parse::<ActivityLevel>().unwrap(), ActivityLevel::VeryActive);
        assert_eq!("mild-loss".parse::<Goal>().unwrap(), Goal::MildLoss);
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);
    }

    #[test]
    fn test_enum_parsing_suggests_closest_value() {
        let err = "MODERAT".parse::<ActivityLevel>().unwrap_err();
        assert!(err.to_string().contains("MODERATE"));

        let err = "banana".parse::<Goal>().unwrap_err();
        assert!(matches!(err, DietError::InvalidProfile(_)));
    }

    #[test]
    fn test_from_json_accepts_aliases_and_drops_blank_signals() {
        let json = r#"{
            "age": 51, "gender": "FEMALE", "weight": 70, "height": 174,
            "activity": "MODERATE", "goal": "WEIGHT_LOSS",
            "hemoglobin": "low", "fatigue": "  "
        }"#;
        let profile = Profile::from_json(json).unwrap();
        assert_eq!(profile.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.health.hemoglobin_level.as_deref(), Some("low"));
        assert_eq!(profile.health.fatigue, None);
    }

    #[test]
    fn test_from_json_rejects_open_enum_values() {
        let json = r#"{
            "age": 30, "gender": "MALE", "weight": 80, "height": 180,
            "activityLevel": "SUPER_ACTIVE", "goal": "MAINTAIN"
        }"#;
        assert!(matches!(
            Profile::from_json(json),
            Err(DietError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_activity_levels_are_ordered() {
        assert!(ActivityLevel::Sedentary < ActivityLevel::VeryActive);
        assert!(Goal::Maintain < Goal::ExtremeLoss);
    }
}
