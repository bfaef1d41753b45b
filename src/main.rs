use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use catalog_bot::bot;
use catalog_bot::catalog::Catalog;
use catalog_bot::command::Command;
use catalog_bot::config::BotConfig;
use catalog_bot::store::{init_storage, JsonFileStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Catalog Telegram Bot");

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(data_file = %config.data_file.display(), "Initializing product storage");
    init_storage(&config.data_file).await?;

    let catalog = Arc::new(Catalog::new(JsonFileStore::new(&config.data_file)));

    // Initialize the bot and register its commands
    let bot = Bot::new(config.bot_token);
    bot.set_my_commands(Command::bot_commands()).await?;

    let me = bot.get_me().await?;
    info!(username = %me.username(), "Bot online, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(bot::message_handler),
        )
        .branch(Update::filter_message().endpoint(bot::invalid_command_handler))
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![catalog])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
