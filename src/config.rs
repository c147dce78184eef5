use std::env;

use teloxide::types::ChatId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("ADMIN_TELEGRAM_ID must be a numeric chat id")]
    BadAdminId,
}

/// Настройки из окружения. Токен бота teloxide читает сам
/// из TELOXIDE_TOKEN.
#[derive(Debug, Clone)]
pub struct Config {
    pub calendar_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub redirect_uri: String,
    pub admin_chat_id: ChatId,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let admin_chat_id = require("ADMIN_TELEGRAM_ID")?
            .parse()
            .map(ChatId)
            .map_err(|_| ConfigError::BadAdminId)?;
        Ok(Self {
            calendar_id: require("CALENDAR_ID")?,
            client_id: require("CLIENT_ID")?,
            client_secret: require("CLIENT_SECRET")?,
            refresh_token: require("REFRESH_TOKEN")?,
            redirect_uri: require("REDIRECT_URI")?,
            admin_chat_id,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}
