use dialoguer::{Input, Select};

use crate::error::{DietError, Result};
use crate::models::{ActivityLevel, Gender, Goal, HealthSignals, Profile};
use crate::planner::constants::{activity_label, goal_label};

/// Prompt for a strictly positive number.
fn prompt_positive(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| DietError::InvalidProfile(format!("'{}' is not a number", input.trim())))?;

    if !(value.is_finite() && value > 0.0) {
        return Err(DietError::InvalidProfile(format!(
            "{} must be positive",
            prompt
        )));
    }

    Ok(value)
}

/// Prompt for age in whole years.
pub fn prompt_age(default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt("Age (years)")
        .default(default.to_string())
        .interact_text()?;

    match input.trim().parse::<u32>() {
        Ok(age) if age > 0 => Ok(age),
        _ => Err(DietError::InvalidProfile(format!(
            "'{}' is not a positive whole number of years",
            input.trim()
        ))),
    }
}

pub fn prompt_gender(default: Gender) -> Result<Gender> {
    let options = ["Женский (FEMALE)", "Мужской (MALE)"];
    let selection = Select::new()
        .with_prompt("Gender")
        .items(&options)
        .default(if default == Gender::Female { 0 } else { 1 })
        .interact()?;

    Ok(if selection == 0 {
        Gender::Female
    } else {
        Gender::Male
    })
}

pub fn prompt_activity(default: ActivityLevel) -> Result<ActivityLevel> {
    let options: Vec<&str> = ActivityLevel::ALL.iter().map(|l| activity_label(*l)).collect();
    let default_idx = ActivityLevel::ALL
        .iter()
        .position(|l| *l == default)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Activity level")
        .items(&options)
        .default(default_idx)
        .interact()?;

    Ok(ActivityLevel::ALL[selection.min(ActivityLevel::ALL.len() - 1)])
}

pub fn prompt_goal(default: Goal) -> Result<Goal> {
    let options: Vec<&str> = Goal::ALL.iter().map(|g| goal_label(*g)).collect();
    let default_idx = Goal::ALL.iter().position(|g| *g == default).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Goal")
        .items(&options)
        .default(default_idx)
        .interact()?;

    Ok(Goal::ALL[selection.min(Goal::ALL.len() - 1)])
}

/// Optional free-text answer; empty input means absent.
fn prompt_optional(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.unwrap_or_default().to_string())
        .allow_empty(true)
        .interact_text()?;

    let input = input.trim();
    Ok((!input.is_empty()).then(|| input.to_string()))
}

pub fn prompt_health_signals(defaults: &HealthSignals) -> Result<HealthSignals> {
    println!("Health signals (optional, used only for advice; leave empty to skip)");
    Ok(HealthSignals {
        hormonal_status: prompt_optional(
            "Hormonal status",
            defaults.hormonal_status.as_deref(),
        )?,
        fatigue: prompt_optional("Fatigue", defaults.fatigue.as_deref())?,
        hemoglobin_level: prompt_optional(
            "Hemoglobin level",
            defaults.hemoglobin_level.as_deref(),
        )?,
        blood_pressure: prompt_optional("Blood pressure", defaults.blood_pressure.as_deref())?,
    })
}

/// Collect a full profile, offering `defaults` for every answer.
pub fn collect_profile(defaults: &Profile) -> Result<Profile> {
    let age = prompt_age(defaults.age)?;
    let gender = prompt_gender(defaults.gender)?;
    let weight = prompt_positive("Weight (kg)", defaults.weight)?;
    let height = prompt_positive("Height (cm)", defaults.height)?;
    let activity = prompt_activity(defaults.activity_level)?;
    let goal = prompt_goal(defaults.goal)?;
    let health = prompt_health_signals(&defaults.health)?;

    Profile::new(age, gender, weight, height, activity, goal, health)
}
