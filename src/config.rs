//! # Configuration Module
//!
//! Startup configuration read from the environment (after `.env` loading).

use std::path::PathBuf;

use crate::errors::ConfigError;
use crate::store::DEFAULT_DATA_FILE;

/// Environment variable holding the Telegram bot token
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Runtime configuration for the bot process
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot API token
    pub bot_token: String,
    /// Location of the products file
    pub data_file: PathBuf,
}

impl BotConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingVar(TOKEN_VAR))?;

        Ok(Self {
            bot_token,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        })
    }
}
