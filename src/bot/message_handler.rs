//! Message Handler module for processing incoming bot commands

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::{BotCommands, ParseError};
use tracing::{debug, error, info};

// Import localization
use crate::localization::t_args_lang;

use crate::catalog::{Catalog, Reply};
use crate::command::Command;
use crate::errors::StorageError;
use crate::product::ProductDraft;

// Import UI builder functions
use super::ui_builder::{render_reply, split_message, RenderedReply, MESSAGE_TEXT_LIMIT};

/// Run one parsed command against the catalog
pub async fn route_command(catalog: &Catalog, cmd: Command) -> Result<Reply, StorageError> {
    match cmd {
        Command::Start => Ok(Reply::Welcome),
        Command::Help => Ok(Reply::Help),
        Command::AddProduct {
            name,
            price,
            description,
        } => {
            catalog
                .add_product(ProductDraft::new(name, price, description))
                .await
        }
        Command::EditProduct {
            id,
            name,
            price,
            description,
        } => {
            catalog
                .edit_product(id, ProductDraft::new(name, price, description))
                .await
        }
        Command::RemoveProduct { id } => catalog.remove_product(id).await,
        Command::ListProducts => catalog.list_products().await,
        Command::Stock => catalog.stock().await,
    }
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    catalog: Arc<Catalog>,
) -> Result<()> {
    // Extract user's language code from Telegram
    let language_code = msg
        .from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str());

    debug!(chat_id = %msg.chat.id, command = ?cmd, "Received command");

    let reply = match route_command(&catalog, cmd).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(chat_id = %msg.chat.id, error = %e, "Command failed on product storage");
            return Err(e.into());
        }
    };

    let RenderedReply { text, keyboard } = render_reply(&reply, language_code);

    // Long listings go out as several messages; the keyboard rides on the last
    let mut chunks = split_message(&text, MESSAGE_TEXT_LIMIT);
    let last = chunks.pop().unwrap_or_default();
    for chunk in chunks {
        bot.send_message(msg.chat.id, chunk).await?;
    }
    let mut request = bot.send_message(msg.chat.id, last);
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await?;

    info!(chat_id = %msg.chat.id, "Command reply sent");
    Ok(())
}

/// Reason to show the user when a message names one of our commands but
/// its arguments do not parse. `None` for anything else.
pub fn invalid_arguments_reason(text: &str, bot_username: &str) -> Option<String> {
    if !text.starts_with('/') {
        return None;
    }

    match Command::parse(text, bot_username) {
        Ok(_) | Err(ParseError::UnknownCommand(_)) | Err(ParseError::WrongBotName(_)) => None,
        Err(ParseError::TooFewArguments { message, .. })
        | Err(ParseError::TooManyArguments { message, .. }) => Some(message),
        Err(ParseError::IncorrectFormat(e)) => Some(e.to_string()),
        Err(other) => Some(other.to_string()),
    }
}

/// Answer commands whose arguments failed to parse with a usage hint
pub async fn invalid_command_handler(bot: Bot, msg: Message, me: Me) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if let Some(reason) = invalid_arguments_reason(text, me.username()) {
        let language_code = msg
            .from
            .as_ref()
            .and_then(|user| user.language_code.as_ref())
            .map(|s| s.as_str());

        debug!(chat_id = %msg.chat.id, reason = %reason, "Rejected command arguments");
        bot.send_message(
            msg.chat.id,
            t_args_lang("error-invalid-command", &[("reason", reason.as_str())], language_code),
        )
        .await?;
    }

    Ok(())
}
