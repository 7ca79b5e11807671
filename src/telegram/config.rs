use std::net::SocketAddr;

use secrecy::SecretString;

use crate::error::{DietError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub bot_token: SecretString,
    pub api_base: String,
    pub mini_app_url: Option<String>,
    pub address: SocketAddr,
}

impl TelegramConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided function.
    pub fn from_env_with<F>(mut get: F) -> Result<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let token = get("TELEGRAM_BOT_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| DietError::Config("TELEGRAM_BOT_TOKEN missing".into()))?;
        let api_base = get("TELEGRAM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into());
        let mini_app_url = get("MINI_APP_URL").filter(|u| !u.trim().is_empty());
        let raw_address = get("RELAY_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.into());
        let address = raw_address
            .parse()
            .map_err(|_| DietError::Config(format!("RELAY_ADDRESS '{raw_address}' is not a socket address")))?;

        Ok(Self {
            bot_token: SecretString::new(token.into()),
            api_base: api_base.trim_end_matches('/').to_string(),
            mini_app_url,
            address,
        })
    }
}
