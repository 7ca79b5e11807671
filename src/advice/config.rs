use std::time::Duration;

use secrecy::SecretString;

use crate::error::{DietError, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Settings for the advice backend.
#[derive(Clone, Debug)]
pub struct AdviceConfig {
    /// `None` means advice is not configured.
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl AdviceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read settings through `get` so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api_key = get("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .map(|k| SecretString::new(k.into()));
        let model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match get("ADVICE_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                DietError::Config(format!("ADVICE_TIMEOUT_SECS must be an integer, got '{raw}'"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let max_retries = match get("ADVICE_MAX_RETRIES") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                DietError::Config(format!("ADVICE_MAX_RETRIES must be an integer, got '{raw}'"))
            })?,
            None => DEFAULT_MAX_RETRIES,
        };

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
