use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::advice::AdviceGateway;
use crate::error::Result;
use crate::models::{CalculationResult, Profile};
use crate::state::session::{AdviceState, AdviceTicket, PlanSession, SessionPhase};

/// Drives a calculation in two stages.
///
/// Stage one (`compute_plan`) is synchronous and always yields a displayable
/// result. Stage two (`resolve_advice`) is the only suspension point; its
/// outcome is applied only if no newer calculation started meanwhile.
pub struct PlanController<G> {
    gateway: G,
    session: Mutex<PlanSession>,
}

impl<G: AdviceGateway> PlanController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            session: Mutex::new(PlanSession::new()),
        }
    }

    /// Compute and store the numeric plan, marking advice as loading.
    pub async fn compute_plan(&self, profile: Profile) -> Result<(CalculationResult, AdviceTicket)> {
        self.session.lock().await.calculate(profile)
    }

    /// Request advice for the plan behind `ticket` and apply it if still current.
    ///
    /// Returns whether the outcome was applied. Gateway failures end up in the
    /// session as [`AdviceState::Unavailable`], never as an error here.
    pub async fn resolve_advice(
        &self,
        profile: &Profile,
        result: &CalculationResult,
        ticket: AdviceTicket,
    ) -> bool {
        let outcome = self.gateway.request_advice(profile, result).await;
        if let Err(e) = &outcome {
            warn!(reason = %e.reason, "continuing without advice");
        }

        let applied = self.session.lock().await.set_advice(ticket, outcome);
        if !applied {
            info!("advice arrived for a superseded calculation and was ignored");
        }
        applied
    }

    /// Run both stages for a profile and return the numeric plan.
    pub async fn calculate(&self, profile: Profile) -> Result<CalculationResult> {
        let (result, ticket) = self.compute_plan(profile.clone()).await?;
        self.resolve_advice(&profile, &result, ticket).await;
        Ok(result)
    }

    pub async fn clear_advice(&self) {
        self.session.lock().await.clear_advice();
    }

    pub async fn phase(&self) -> SessionPhase {
        self.session.lock().await.phase()
    }

    pub async fn advice(&self) -> Option<AdviceState> {
        self.session.lock().await.advice().cloned()
    }

    pub async fn result(&self) -> Option<CalculationResult> {
        self.session.lock().await.result().cloned()
    }

    pub async fn profile(&self) -> Option<Profile> {
        self.session.lock().await.profile().cloned()
    }
}
