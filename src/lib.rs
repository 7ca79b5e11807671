pub mod advice;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod state;
pub mod telegram;

pub use error::{DietError, Result};
pub use models::{AIAdvice, CalculationResult, Profile};
