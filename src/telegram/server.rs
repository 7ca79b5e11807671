use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderName, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::{DietError, Result};
use crate::telegram::{BotCommand, TelegramApi, Update, reply_for};

const CORS_HEADERS: [(HeaderName, &str); 2] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "authorization, x-client-info, apikey, content-type",
    ),
];

pub struct RelayState {
    pub api: Arc<dyn TelegramApi>,
    pub mini_app_url: Option<String>,
}

/// Router answering on every path and method.
pub fn router(state: Arc<RelayState>) -> Router {
    Router::new().fallback(handle).with_state(state)
}

async fn handle(State(state): State<Arc<RelayState>>, method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::NO_CONTENT, CORS_HEADERS).into_response();
    }

    match process(&state, &body).await {
        Ok(value) => (StatusCode::OK, CORS_HEADERS, Json(value)).into_response(),
        Err(e) => {
            error!(error = %e, "relay request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                CORS_HEADERS,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn process(state: &RelayState, body: &[u8]) -> Result<Value> {
    let payload: Value = serde_json::from_slice(body)?;

    if payload.get("action").and_then(Value::as_str) == Some("set-webhook") {
        let url = payload
            .get("webhook_url")
            .and_then(Value::as_str)
            .ok_or_else(|| DietError::Telegram("webhook_url is required".into()))?;
        info!(url, "set-webhook requested");
        return state.api.set_webhook(url).await;
    }

    let update: Update = serde_json::from_value(payload)?;
    handle_update(state, update).await?;
    Ok(json!({ "ok": true }))
}

async fn handle_update(state: &RelayState, update: Update) -> Result<()> {
    let Some(message) = update.message else {
        return Ok(());
    };
    let Some(text) = message.text.as_deref() else {
        return Ok(());
    };

    let command = BotCommand::parse(text);
    let first_name = message.from.as_ref().and_then(|u| u.first_name.as_deref());
    let reply = reply_for(&command, first_name, state.mini_app_url.as_deref());

    state.api.send_message(message.chat.id, &reply).await?;
    Ok(())
}
