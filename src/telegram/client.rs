use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::Result;
use crate::telegram::{OPEN_APP_LABEL, Reply};

/// The two Bot API calls the relay needs.
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// Send `reply` to a chat. Returns the Bot API response body.
    async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<Value>;

    /// Register the webhook URL. Returns the Bot API response body.
    async fn set_webhook(&self, url: &str) -> Result<Value>;
}

/// Bot API client using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestTelegramApi {
    api_base: String,
    token: SecretString,
    client: Client,
}

impl ReqwestTelegramApi {
    pub fn new(api_base: &str, token: SecretString) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            client: Client::new(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base,
            self.token.expose_secret(),
            method
        )
    }

    async fn call(&self, method: &str, body: &Value) -> Result<Value> {
        // The URL embeds the token, so it is stripped from transport errors.
        let value: Value = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        if value.get("ok").and_then(Value::as_bool) != Some(true) {
            let description = value.get("description").and_then(Value::as_str).unwrap_or("");
            warn!(method, description, "bot api call was not ok");
        }
        Ok(value)
    }
}

/// Request body for `sendMessage`.
pub fn send_message_body(chat_id: i64, reply: &Reply) -> Value {
    let mut body = json!({
        "chat_id": chat_id,
        "text": reply.text,
        "parse_mode": "HTML",
    });
    if let Some(url) = &reply.web_app_url {
        body["reply_markup"] = json!({
            "inline_keyboard": [[{ "text": OPEN_APP_LABEL, "web_app": { "url": url } }]]
        });
    }
    body
}

#[async_trait]
impl TelegramApi for ReqwestTelegramApi {
    async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<Value> {
        debug!(chat_id, "sending reply");
        self.call("sendMessage", &send_message_body(chat_id, reply)).await
    }

    async fn set_webhook(&self, url: &str) -> Result<Value> {
        debug!(url, "registering webhook");
        self.call("setWebhook", &json!({ "url": url })).await
    }
}
