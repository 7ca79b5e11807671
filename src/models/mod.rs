mod advice;
mod plan;
mod profile;

pub use advice::{AIAdvice, DayMenu, Meal};
pub use plan::{CalculationResult, MacroRationale, Macros};
pub use profile::{ActivityLevel, Gender, Goal, HealthSignals, Profile};
