pub mod prompts;
pub mod render;

pub use prompts::{
    collect_profile, prompt_activity, prompt_age, prompt_gender, prompt_goal,
    prompt_health_signals,
};
pub use render::{display_advice, display_advice_state, display_plan, display_profile};
