//! Google Gemini implementation of [`AdviceGateway`].
//!
//! Sends one `generateContent` call per request, asks for a JSON response, and
//! runs the reply through [`parse_advice`]. Transport, status and payload
//! failures are all mapped to [`AdviceUnavailable`].

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::advice::config::AdviceConfig;
use crate::advice::parse::parse_advice;
use crate::advice::prompt::{SYSTEM_INSTRUCTION, build_prompt};
use crate::advice::retry::RetryPolicy;
use crate::advice::{AdviceGateway, AdviceUnavailable, UnavailableReason};
use crate::error::Result;
use crate::models::{AIAdvice, CalculationResult, Profile};

/// Sampling temperature for advice generation.
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Advice gateway backed by the Gemini `generateContent` API.
#[derive(Clone, Debug)]
pub struct GeminiAdviceGateway {
    config: AdviceConfig,
    client: Client,
    retry: RetryPolicy,
}

impl GeminiAdviceGateway {
    pub fn new(config: AdviceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let retry = RetryPolicy::new(config.max_retries);
        Ok(Self {
            config,
            client,
            retry,
        })
    }

    /// Replace the retry policy (tests use short delays).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    fn build_request(profile: &Profile, result: &CalculationResult) -> GenerateRequest {
        GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(SYSTEM_INSTRUCTION.to_string()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(build_prompt(profile, result)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                response_mime_type: "application/json",
            },
        }
    }

    /// One attempt: send, check status, pull candidate text, parse.
    async fn attempt(&self, body: &GenerateRequest) -> std::result::Result<AIAdvice, AdviceUnavailable> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            AdviceUnavailable::new(UnavailableReason::NotConfigured, "GEMINI_API_KEY is not set")
        })?;

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let snippet: String = text.chars().take(256).collect();
            let detail = format!("status {}: {}", status.as_u16(), snippet);
            return Err(if status.is_server_error() || status.as_u16() == 429 {
                AdviceUnavailable::transient_service(detail)
            } else {
                AdviceUnavailable::new(UnavailableReason::ServiceError, detail)
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            AdviceUnavailable::new(
                UnavailableReason::Malformed,
                format!("unexpected response envelope: {e}"),
            )
        })?;

        let content = extract_text(parsed)?;
        parse_advice(&content)
    }
}

/// Join the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> std::result::Result<String, AdviceUnavailable> {
    if let Some(error) = response.error {
        return Err(AdviceUnavailable::new(
            UnavailableReason::ServiceError,
            error.message,
        ));
    }
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(AdviceUnavailable::new(
            UnavailableReason::ServiceError,
            format!("prompt blocked: {reason}"),
        ));
    }

    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        AdviceUnavailable::new(UnavailableReason::ServiceError, "no candidates returned")
    })?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(AdviceUnavailable::new(
            UnavailableReason::ServiceError,
            format!("empty candidate (finish reason {reason})"),
        ));
    }

    Ok(text)
}

fn map_transport_error(e: reqwest::Error) -> AdviceUnavailable {
    if e.is_timeout() {
        AdviceUnavailable::new(UnavailableReason::Timeout, e.to_string())
    } else if e.is_decode() {
        AdviceUnavailable::new(UnavailableReason::Malformed, e.to_string())
    } else {
        AdviceUnavailable::new(UnavailableReason::Network, e.to_string())
    }
}

#[async_trait]
impl AdviceGateway for GeminiAdviceGateway {
    #[instrument(skip(self, profile, result), fields(model = %self.config.model))]
    async fn request_advice(
        &self,
        profile: &Profile,
        result: &CalculationResult,
    ) -> std::result::Result<AIAdvice, AdviceUnavailable> {
        let body = Self::build_request(profile, result);
        debug!("requesting advice");

        let outcome = self.retry.retry_async(|| self.attempt(&body)).await;
        match &outcome {
            Ok(advice) => debug!(tips = advice.tips.len(), "advice received"),
            Err(e) => warn!(reason = %e.reason, detail = %e.detail, "advice unavailable"),
        }
        outcome
    }
}
