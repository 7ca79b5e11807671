//! Boundary to the external text-generation service.
//!
//! The calculator never depends on this module succeeding. Every failure is
//! normalized to [`AdviceUnavailable`] with a reason code for logging.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AIAdvice, CalculationResult, Profile};

pub mod config;
pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod retry;

pub use config::AdviceConfig;
pub use gemini::GeminiAdviceGateway;
pub use parse::parse_advice;
pub use prompt::build_prompt;
pub use retry::RetryPolicy;

/// Why advice could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// No backend credentials, or advice disabled by the caller.
    NotConfigured,
    /// Connection or transport failure.
    Network,
    Timeout,
    /// The service answered with an error status or error payload.
    ServiceError,
    /// The response could not be turned into structured advice.
    Malformed,
}

impl UnavailableReason {
    /// Stable code for logs and JSON output.
    pub fn code(self) -> &'static str {
        match self {
            UnavailableReason::NotConfigured => "not_configured",
            UnavailableReason::Network => "network",
            UnavailableReason::Timeout => "timeout",
            UnavailableReason::ServiceError => "service_error",
            UnavailableReason::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminal failure outcome of an advice request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("advice unavailable ({reason}): {detail}")]
pub struct AdviceUnavailable {
    pub reason: UnavailableReason,
    pub detail: String,
    /// Whether another attempt could plausibly succeed.
    pub transient: bool,
}

impl AdviceUnavailable {
    pub fn new(reason: UnavailableReason, detail: impl Into<String>) -> Self {
        let transient = matches!(reason, UnavailableReason::Network | UnavailableReason::Timeout);
        Self {
            reason,
            detail: detail.into(),
            transient,
        }
    }

    /// Service error that is worth retrying (5xx, rate limiting).
    pub fn transient_service(detail: impl Into<String>) -> Self {
        Self {
            reason: UnavailableReason::ServiceError,
            detail: detail.into(),
            transient: true,
        }
    }
}

/// Anything that turns a profile and its plan into narrative advice.
#[async_trait]
pub trait AdviceGateway: Send + Sync {
    async fn request_advice(
        &self,
        profile: &Profile,
        result: &CalculationResult,
    ) -> Result<AIAdvice, AdviceUnavailable>;
}

/// Gateway used when advice is switched off.
#[derive(Debug, Clone, Default)]
pub struct DisabledAdviceGateway;

#[async_trait]
impl AdviceGateway for DisabledAdviceGateway {
    async fn request_advice(
        &self,
        _profile: &Profile,
        _result: &CalculationResult,
    ) -> Result<AIAdvice, AdviceUnavailable> {
        Err(AdviceUnavailable::new(
            UnavailableReason::NotConfigured,
            "advice generation is disabled",
        ))
    }
}

#[async_trait]
impl<G: AdviceGateway + ?Sized> AdviceGateway for std::sync::Arc<G> {
    async fn request_advice(
        &self,
        profile: &Profile,
        result: &CalculationResult,
    ) -> Result<AIAdvice, AdviceUnavailable> {
        (**self).request_advice(profile, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes_are_distinct() {
        let codes = [
            UnavailableReason::NotConfigured,
            UnavailableReason::Network,
            UnavailableReason::Timeout,
            UnavailableReason::ServiceError,
            UnavailableReason::Malformed,
        ]
        .map(UnavailableReason::code);

        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_transient_classification() {
        assert!(AdviceUnavailable::new(UnavailableReason::Timeout, "t").transient);
        assert!(AdviceUnavailable::new(UnavailableReason::Network, "n").transient);
        assert!(!AdviceUnavailable::new(UnavailableReason::Malformed, "m").transient);
        assert!(!AdviceUnavailable::new(UnavailableReason::ServiceError, "400").transient);
        assert!(AdviceUnavailable::transient_service("503").transient);
    }
}
