#[macro_use]
extern crate assert_float_eq;

use smart_diet_rs::DietError;
use smart_diet_rs::models::{
    ActivityLevel, CalculationResult, Gender, Goal, HealthSignals, Profile,
};
use smart_diet_rs::planner::{
    CARB_FLOOR_GRAMS, CARB_KCAL_PER_GRAM, FAT_CALORIE_SHARE, PROTEIN_GRAMS_PER_KG,
    PROTEIN_KCAL_PER_GRAM, activity_multiplier, calculate_bmr, compute, goal_adjustment,
};

fn make_profile(
    age: u32,
    gender: Gender,
    weight: f64,
    height: f64,
    activity: ActivityLevel,
    goal: Goal,
) -> Profile {
    Profile {
        age,
        gender,
        weight,
        height,
        activity_level: activity,
        goal,
        health: HealthSignals::default(),
    }
}

fn reference(gender: Gender) -> Profile {
    make_profile(51, gender, 70.0, 174.0, ActivityLevel::Moderate, Goal::WeightLoss)
}

/// A spread of valid profiles across every enum value, including small
/// elderly bodies whose aggressive goals push the target below zero.
fn profile_grid() -> Vec<Profile> {
    let mut out = Vec::new();
    for gender in Gender::ALL {
        for activity in ActivityLevel::ALL {
            for goal in Goal::ALL {
                for (age, weight, height) in [
                    (18, 45.0, 150.0),
                    (51, 70.0, 174.0),
                    (80, 140.0, 195.0),
                    (80, 40.0, 150.0),
                    (95, 35.0, 140.0),
                ] {
                    out.push(make_profile(age, gender, weight, height, activity, goal));
                }
            }
        }
    }
    out
}

fn raw_target(profile: &Profile) -> f64 {
    calculate_bmr(profile) * activity_multiplier(profile.activity_level) + goal_adjustment(profile.goal)
}

/// Results for grid profiles that produce a plan. Every other profile must be
/// rejected as invalid because its target is not positive.
fn computed_grid() -> Vec<(Profile, CalculationResult)> {
    let mut out = Vec::new();
    for profile in profile_grid() {
        match compute(&profile) {
            Ok(result) => out.push((profile, result)),
            Err(DietError::InvalidProfile(_)) => assert!(raw_target(&profile) <= 0.0),
            Err(e) => panic!("unexpected error {e} for {profile:?}"),
        }
    }
    out
}

#[test]
fn test_compute_is_deterministic() {
    for profile in profile_grid() {
        let first = compute(&profile).ok();
        let second = compute(&profile).ok();
        assert_eq!(first, second);
    }
}

#[test]
fn test_bmr_sign_split() {
    let female = compute(&reference(Gender::Female)).unwrap();
    let male = compute(&reference(Gender::Male)).unwrap();

    assert_float_absolute_eq!(female.bmr, 1371.5, 1e-9);
    assert_float_absolute_eq!(male.bmr, 1537.5, 1e-9);
    assert_float_absolute_eq!(male.bmr - female.bmr, 166.0, 1e-9);
}

#[test]
fn test_tdee_and_goal_adjustment() {
    let result = compute(&reference(Gender::Female)).unwrap();

    assert_float_absolute_eq!(result.tdee, 2125.825, 1e-9);
    assert_float_absolute_eq!(result.target_calories, 1625.825, 1e-9);
}

#[test]
fn test_each_activity_and_goal_constant() {
    let expected_multipliers = [1.2, 1.375, 1.55, 1.725, 1.9];
    for (activity, mult) in ActivityLevel::ALL.into_iter().zip(expected_multipliers) {
        let mut p = reference(Gender::Female);
        p.activity_level = activity;
        p.goal = Goal::Maintain;
        let r = compute(&p).unwrap();
        assert_float_absolute_eq!(r.tdee, 1371.5 * mult, 1e-9);
        assert_float_absolute_eq!(r.target_calories, r.tdee, 1e-9);
    }

    let expected_adjustments = [0.0, -250.0, -500.0, -1000.0];
    for (goal, adj) in Goal::ALL.into_iter().zip(expected_adjustments) {
        let mut p = reference(Gender::Male);
        p.goal = goal;
        let r = compute(&p).unwrap();
        assert_float_absolute_eq!(r.target_calories - r.tdee, adj, 1e-9);
    }
}

#[test]
fn test_protein_depends_only_on_weight() {
    for (profile, result) in computed_grid() {
        assert_eq!(result.macros.protein_grams, PROTEIN_GRAMS_PER_KG * profile.weight);
    }
}

#[test]
fn test_fat_is_share_of_target() {
    let result = compute(&reference(Gender::Female)).unwrap();
    assert_float_absolute_eq!(
        result.macros.fat_grams * 9.0,
        result.target_calories * FAT_CALORIE_SHARE,
        1e-9
    );
}

#[test]
fn test_carb_floor_triggers() {
    // 130 kg, sedentary, extreme loss: protein alone is 1040 kcal
    let profile = make_profile(70, Gender::Female, 130.0, 150.0, ActivityLevel::Sedentary, Goal::ExtremeLoss);
    let result = compute(&profile).unwrap();

    let protein_cal = result.macros.protein_grams * PROTEIN_KCAL_PER_GRAM;
    let fat_cal = result.target_calories * FAT_CALORIE_SHARE;
    let raw_carb_cal = result.target_calories - protein_cal - fat_cal;

    assert!(raw_carb_cal < 0.0, "expected negative carb remainder, got {}", raw_carb_cal);
    assert_eq!(result.macros.carb_grams, CARB_FLOOR_GRAMS);
    assert!(result.carb_floor_applied);

    // Floor is kept even though the macros now exceed the target
    assert!(result.macro_calories() > result.target_calories);
}

#[test]
fn test_carb_remainder_without_floor() {
    let result = compute(&reference(Gender::Female)).unwrap();
    let expected = (result.target_calories
        - result.macros.protein_grams * PROTEIN_KCAL_PER_GRAM
        - result.target_calories * FAT_CALORIE_SHARE)
        / CARB_KCAL_PER_GRAM;

    assert!(!result.carb_floor_applied);
    assert_float_absolute_eq!(result.macros.carb_grams, expected, 1e-9);
    assert_float_absolute_eq!(result.macro_calories(), result.target_calories, 1e-6);
}

#[test]
fn test_macros_non_negative() {
    for (_, result) in computed_grid() {
        assert!(result.bmr > 0.0);
        assert!(result.target_calories > 0.0);
        assert!(result.macros.protein_grams >= 0.0);
        assert!(result.macros.fat_grams >= 0.0);
        assert!(result.macros.carb_grams >= CARB_FLOOR_GRAMS);
    }
}

#[test]
fn test_health_signals_do_not_change_result() {
    let bare = reference(Gender::Female);
    let mut enriched = bare.clone();
    enriched.health = HealthSignals {
        hormonal_status: Some("пременопауза".to_string()),
        fatigue: Some("высокая".to_string()),
        hemoglobin_level: Some("низкий".to_string()),
        blood_pressure: Some("100/65".to_string()),
    };

    assert_eq!(compute(&bare).unwrap(), compute(&enriched).unwrap());
}

#[test]
fn test_invalid_profiles_are_rejected() {
    let mut zero_age = reference(Gender::Male);
    zero_age.age = 0;
    let mut negative_weight = reference(Gender::Male);
    negative_weight.weight = -70.0;
    let mut zero_height = reference(Gender::Male);
    zero_height.height = 0.0;

    for profile in [zero_age, negative_weight, zero_height] {
        assert!(matches!(compute(&profile), Err(DietError::InvalidProfile(_))));
    }
}

#[test]
fn test_negative_target_is_rejected_not_clamped() {
    let profile = make_profile(80, Gender::Female, 40.0, 150.0, ActivityLevel::Sedentary, Goal::ExtremeLoss);
    assert!(raw_target(&profile) < 0.0);
    assert!(matches!(compute(&profile), Err(DietError::InvalidProfile(_))));

    // The same body with a milder goal still gets a plan
    let mild = Profile {
        goal: Goal::MildLoss,
        ..profile
    };
    let result = compute(&mild).unwrap();
    assert!(result.macros.fat_grams > 0.0);
}

#[test]
fn test_grid_reaches_rejections() {
    let rejected = profile_grid()
        .iter()
        .filter(|p| compute(p).is_err())
        .count();
    assert!(rejected > 0);
    assert!(computed_grid().len() > rejected);
}
