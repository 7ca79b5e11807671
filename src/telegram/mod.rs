//! Minimal Telegram bot webhook relay.
//!
//! Commands are matched exactly and answered with fixed replies; anything else
//! is echoed back. There is no per-chat state.

use serde::Deserialize;

pub mod client;
pub mod config;
pub mod server;

pub use client::{ReqwestTelegramApi, TelegramApi};
pub use config::TelegramConfig;
pub use server::{RelayState, router};

/// Name used in the greeting when the sender has no first name.
pub const FALLBACK_NAME: &str = "Пользователь";

/// Label of the inline button that opens the mini app.
pub const OPEN_APP_LABEL: &str = "Открыть приложение";

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Recognized bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    App,
    Echo(String),
}

impl BotCommand {
    /// Exact-match dispatch; `/start@bot` or padded text are echoed.
    pub fn parse(text: &str) -> Self {
        match text {
            "/start" => BotCommand::Start,
            "/help" => BotCommand::Help,
            "/app" => BotCommand::App,
            other => BotCommand::Echo(other.to_string()),
        }
    }
}

/// Outgoing message, HTML formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// When set, the message carries a button opening this mini app URL.
    pub web_app_url: Option<String>,
}

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build the reply for a command.
pub fn reply_for(command: &BotCommand, first_name: Option<&str>, mini_app_url: Option<&str>) -> Reply {
    let text = match command {
        BotCommand::Start => format!(
            "👋 Привет, <b>{}</b>!\n\nДобро пожаловать! Я бот для Telegram Mini App.\n\nИспользуйте /help для списка команд.",
            escape_html(first_name.unwrap_or(FALLBACK_NAME))
        ),
        BotCommand::Help => "📋 <b>Доступные команды:</b>\n\n/start - Начать работу\n/help - Список команд\n/app - Открыть Mini App".to_string(),
        BotCommand::App => "🚀 Нажмите кнопку ниже, чтобы открыть Mini App!".to_string(),
        BotCommand::Echo(text) => format!(
            "Вы написали: <i>{}</i>\n\nИспользуйте /help для списка команд.",
            escape_html(text)
        ),
    };

    let web_app_url = match command {
        BotCommand::App => mini_app_url.map(str::to_string),
        _ => None,
    };

    Reply { text, web_app_url }
}
