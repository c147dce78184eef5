use std::error::Error;

use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::engine::{advance, TurnInput, TurnOutcome};
use crate::handlers::finalize_booking;
use crate::handlers::utils::{send_reply, venue_today};
use crate::models::ButtonAction;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;

    let Some(action) = ButtonAction::parse(data) else {
        log::warn!("Unrecognized callback value from chat {chat_id}: {data}");
        return Ok(());
    };

    let mut session = state.session(chat_id).await;
    match advance(&mut session, TurnInput::Button(action), venue_today()) {
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
