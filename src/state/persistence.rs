use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{AIAdvice, Profile};

/// Load and validate a profile from a JSON file.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile> {
    let content = fs::read_to_string(path)?;
    Profile::from_json(&content)
}

/// Write the weekly menu as `day,time,dish,calories` rows.
///
/// Returns the number of meal rows written; a missing menu writes only the header.
pub fn write_menu_csv<P: AsRef<Path>>(path: P, advice: &AIAdvice) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["day", "time", "dish", "calories"])?;

    let mut rows = 0;
    for day in advice.weekly_menu.iter().flatten() {
        for meal in &day.meals {
            wtr.write_record([
                day.day.to_string(),
                meal.time.clone(),
                meal.dish.clone(),
                format!("{:.0}", meal.calories),
            ])?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}
