mod controller;
mod persistence;
mod session;

pub use controller::PlanController;
pub use persistence::{load_profile, write_menu_csv};
pub use session::{AdviceState, AdviceTicket, PlanSession, SessionPhase};
