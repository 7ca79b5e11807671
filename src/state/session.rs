use serde::Serialize;
use tracing::debug;

use crate::advice::AdviceUnavailable;
use crate::error::Result;
use crate::models::{AIAdvice, CalculationResult, Profile};
use crate::planner;

/// Where the advice half of a session stands.
#[derive(Debug, Clone, PartialEq)]
pub enum AdviceState {
    NotRequested,
    Loading,
    Ready(AIAdvice),
    Unavailable(AdviceUnavailable),
}

/// Coarse session phase, suitable for choosing what to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Computed,
    AdviceLoading,
    AdviceReady,
    AdviceFailed,
}

/// Handle tying an advice request to the profile it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceTicket {
    generation: u64,
}

/// Owner of the current profile / result / advice triple.
///
/// All changes go through the transition methods. Every new profile starts a
/// new generation; advice carrying an older ticket is discarded.
#[derive(Debug, Default)]
pub struct PlanSession {
    profile: Option<Profile>,
    result: Option<CalculationResult>,
    advice: Option<AdviceState>,
    generation: u64,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the profile. Clears the previous result and advice.
    pub fn set_profile(&mut self, profile: Profile) {
        self.generation += 1;
        self.profile = Some(profile);
        self.result = None;
        self.advice = None;
        debug!(generation = self.generation, "profile set");
    }

    /// Store the numeric plan for the current profile.
    pub fn set_result(&mut self, result: CalculationResult) {
        self.result = Some(result);
        self.advice = Some(AdviceState::NotRequested);
    }

    /// Mark advice as loading and hand out a ticket for the current generation.
    pub fn begin_advice(&mut self) -> AdviceTicket {
        self.advice = Some(AdviceState::Loading);
        AdviceTicket {
            generation: self.generation,
        }
    }

    /// Apply an advice outcome if its ticket is still current.
    ///
    /// Returns `false` when the outcome was stale and dropped.
    pub fn set_advice(
        &mut self,
        ticket: AdviceTicket,
        outcome: std::result::Result<AIAdvice, AdviceUnavailable>,
    ) -> bool {
        if !self.is_current(ticket) || self.result.is_none() {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale advice"
            );
            return false;
        }

        self.advice = Some(match outcome {
            Ok(advice) => AdviceState::Ready(advice),
            Err(e) => AdviceState::Unavailable(e),
        });
        true
    }

    /// Forget any advice for the current result.
    ///
    /// Outstanding tickets are invalidated so a late outcome cannot restore
    /// what was cleared.
    pub fn clear_advice(&mut self) {
        self.generation += 1;
        if self.result.is_some() {
            self.advice = Some(AdviceState::NotRequested);
        }
    }

    /// Validate, compute and store a plan, then open an advice request.
    ///
    /// On an invalid profile the session is left untouched.
    pub fn calculate(&mut self, profile: Profile) -> Result<(CalculationResult, AdviceTicket)> {
        let result = planner::compute(&profile)?;
        self.set_profile(profile);
        self.set_result(result.clone());
        Ok((result, self.begin_advice()))
    }

    pub fn is_current(&self, ticket: AdviceTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn advice(&self) -> Option<&AdviceState> {
        self.advice.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.result, &self.advice) {
            (None, _) => SessionPhase::Idle,
            (Some(_), None | Some(AdviceState::NotRequested)) => SessionPhase::Computed,
            (Some(_), Some(AdviceState::Loading)) => SessionPhase::AdviceLoading,
            (Some(_), Some(AdviceState::Ready(_))) => SessionPhase::AdviceReady,
            (Some(_), Some(AdviceState::Unavailable(_))) => SessionPhase::AdviceFailed,
        }
    }
}
