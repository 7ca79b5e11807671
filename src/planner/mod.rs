pub mod calculations;
pub mod constants;

pub use calculations::{calculate_bmr, calculate_macros, compute};
pub use constants::*;
