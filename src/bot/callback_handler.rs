//! Callback Handler module for processing stock button clicks

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, warn};

use crate::catalog::{Catalog, DetailView};
use crate::errors::StorageError;
use crate::selector::SelectorId;

// Import UI builder functions
use super::ui_builder::{fit_alert_text, format_detail_card};

/// Detail view for a callback payload.
///
/// Undecodable payloads and unknown ids both yield `None`.
pub async fn resolve_selection(
    catalog: &Catalog,
    data: &str,
) -> Result<Option<DetailView>, StorageError> {
    let selector = match SelectorId::decode(data) {
        Ok(selector) => selector,
        Err(e) => {
            warn!(error = %e, "Ignoring callback with malformed selector");
            return Ok(None);
        }
    };

    catalog.select_product(selector).await
}

/// Handle callback queries from the stock keyboard
pub async fn callback_handler(bot: Bot, q: CallbackQuery, catalog: Arc<Catalog>) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    let data = q.data.as_deref().unwrap_or("");
    let language_code = q.from.language_code.as_deref();

    match resolve_selection(&catalog, data).await? {
        Some(detail) => {
            // The alert is only shown to the user who clicked
            let card = fit_alert_text(&format_detail_card(&detail, language_code));
            bot.answer_callback_query(q.id.clone())
                .text(card)
                .show_alert(true)
                .await?;
            debug!(user_id = %q.from.id, product_id = detail.id, "Sent product detail");
        }
        None => {
            debug!(user_id = %q.from.id, data, "No product for selector");
            // Answer the callback query to remove the loading state
            bot.answer_callback_query(q.id).await?;
        }
    }

    Ok(())
}
