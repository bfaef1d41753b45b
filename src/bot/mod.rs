//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Routes parsed commands to the catalog and replies
//! - `callback_handler`: Handles stock keyboard button clicks
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::{invalid_command_handler, message_handler};

// Re-export utility functions that might be used elsewhere
pub use callback_handler::resolve_selection;
pub use message_handler::route_command;
pub use ui_builder::{format_detail_card, format_product_list, render_reply};
