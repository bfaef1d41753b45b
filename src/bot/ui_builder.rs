//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::command::BotCommands;

// Import localization
use crate::localization::{t_args_lang, t_lang};

use crate::catalog::{DetailView, Reply, StockView};
use crate::command::Command;
use crate::product::Product;

/// Telegram's limit on callback query alert text, in characters
pub const ALERT_TEXT_LIMIT: usize = 200;

/// Telegram's limit on message text, in characters
pub const MESSAGE_TEXT_LIMIT: usize = 4096;

/// Message text plus optional inline keyboard, ready to send
#[derive(Debug, Clone)]
pub struct RenderedReply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl RenderedReply {
    fn text(text: String) -> Self {
        Self {
            text,
            keyboard: None,
        }
    }
}

/// Render a command reply in the user's language
pub fn render_reply(reply: &Reply, language_code: Option<&str>) -> RenderedReply {
    match reply {
        Reply::Welcome => RenderedReply::text(t_lang("welcome", language_code)),
        Reply::Help => RenderedReply::text(Command::descriptions().to_string()),
        Reply::Added { id } => RenderedReply::text(t_args_lang(
            "product-added",
            &[("id", id.to_string().as_str())],
            language_code,
        )),
        Reply::Updated { id } => RenderedReply::text(t_args_lang(
            "product-updated",
            &[("id", id.to_string().as_str())],
            language_code,
        )),
        Reply::NotFound { .. } => RenderedReply::text(t_lang("product-not-found", language_code)),
        Reply::Removed { id } => RenderedReply::text(t_args_lang(
            "product-removed",
            &[("id", id.to_string().as_str())],
            language_code,
        )),
        Reply::Listing(products) => {
            RenderedReply::text(format_product_list(products, language_code))
        }
        Reply::Stock(view) => RenderedReply {
            text: t_lang("stock-header", language_code),
            keyboard: create_stock_keyboard(view),
        },
    }
}

/// One `ID | name | price` line per product, or the empty message
pub fn format_product_list(products: &[Product], language_code: Option<&str>) -> String {
    if products.is_empty() {
        return t_lang("list-empty", language_code);
    }

    products
        .iter()
        .map(|p| {
            t_args_lang(
                "list-line",
                &[
                    ("id", p.id.to_string().as_str()),
                    ("name", p.name.as_str()),
                    ("price", p.price.to_string().as_str()),
                ],
                language_code,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inline keyboard with one button per product, rows as grouped in the view.
///
/// Telegram rejects empty rows, so they are skipped; with no products at all
/// there is no keyboard.
pub fn create_stock_keyboard(view: &StockView) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = view
        .rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.iter()
                .map(|selector| {
                    InlineKeyboardButton::callback(selector.label.clone(), selector.id.encode())
                })
                .collect()
        })
        .collect();

    if rows.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(rows))
    }
}

/// Detail card text: title, then the ID, Price and Description fields
pub fn format_detail_card(detail: &DetailView, language_code: Option<&str>) -> String {
    format!(
        "{}\n\n{}: {}\n{}: {}\n{}: {}",
        detail.title,
        t_lang("detail-id", language_code),
        detail.id,
        t_lang("detail-price", language_code),
        detail.price,
        t_lang("detail-description", language_code),
        detail.description
    )
}

/// Split text into messages of at most `limit` characters.
///
/// Cuts fall between lines, so a listing never breaks mid-record; a single
/// line longer than `limit` is cut into `limit`-sized pieces. Always returns
/// at least one chunk.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for line in text.split('\n') {
        let line_len = line.chars().count();

        if line_len > limit {
            if let Some((chunk, _)) = current.take() {
                chunks.push(chunk);
            }
            let chars: Vec<char> = line.chars().collect();
            chunks.extend(chars.chunks(limit).map(|piece| piece.iter().collect::<String>()));
            continue;
        }

        current = match current.take() {
            Some((mut chunk, len)) if len + 1 + line_len <= limit => {
                chunk.push('\n');
                chunk.push_str(line);
                Some((chunk, len + 1 + line_len))
            }
            Some((chunk, _)) => {
                chunks.push(chunk);
                Some((line.to_string(), line_len))
            }
            None => Some((line.to_string(), line_len)),
        };
    }

    if let Some((chunk, _)) = current {
        chunks.push(chunk);
    }
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}

/// Truncate text to fit a callback alert, marking the cut with an ellipsis
pub fn fit_alert_text(text: &str) -> String {
    if text.chars().count() <= ALERT_TEXT_LIMIT {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(ALERT_TEXT_LIMIT - 1).collect();
    truncated.push('…');
    truncated
}
