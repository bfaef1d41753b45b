//! # Catalog Telegram Bot
//!
//! A Telegram bot that manages a product catalog stored in a JSON file:
//! commands to add, edit, remove and list products, and an interactive
//! stock keyboard whose buttons reveal a product's details.

pub mod bot;
pub mod catalog;
pub mod command;
pub mod config;
pub mod errors;
pub mod localization;
pub mod product;
pub mod selector;
pub mod store;
