use std::error::Error;

use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::engine::{advance, TurnInput, TurnOutcome};
use crate::handlers::utils::{send_reply, venue_today};
use crate::handlers::finalize_booking;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Команды обрабатываются отдельной веткой диспетчера
    if text.starts_with('/') {
        return Ok(());
    }

    let chat_id = msg.chat.id;
    let mut session = state.session(chat_id).await;
    match advance(&mut session, TurnInput::Text(text), venue_today()) {
        TurnOutcome::Reply(reply) => {
            state.save_session(chat_id, session).await;
            send_reply(&bot, chat_id, reply).await?;
        }
        TurnOutcome::Finalize(schedule) => {
            finalize_booking(&bot, chat_id, &state, session, schedule).await?;
        }
        TurnOutcome::Ignored => {}
    }
    Ok(())
}
