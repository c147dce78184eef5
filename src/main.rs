use teloxide::{prelude::*, utils::command::BotCommands};

mod booking;
mod bot_state;
mod calendar;
mod config;
mod engine;
mod handlers;
mod models;

use crate::bot_state::BotState;
use crate::calendar::GoogleCalendar;
use crate::config::Config;
use crate::handlers::{callback_handler, command_handler, message_handler};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "получить информацию о пространстве")]
    Start,
    #[command(description = "расскажу о помещениях")]
    Info,
    #[command(description = "арендовать пространство")]
    Book,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting booking bot...");

    let config = Config::from_env()?;
    let calendar = GoogleCalendar::new(&config);
    let state = BotState::new(config, calendar);

    let bot = Bot::from_env();
    bot.set_my_commands(Command::bot_commands()).await?;

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
