pub mod callbacks;
pub mod commands;
pub mod messages;
pub mod utils;

pub use callbacks::callback_handler;
pub use commands::command_handler;
pub use messages::message_handler;

use std::error::Error;

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use crate::booking::{self, Booking};
use crate::bot_state::BotState;
use crate::calendar::{is_slot_available, CalendarApi};
use crate::engine::{self, KeyboardKind, Reply};
use crate::models::{BookingSession, Schedule};
use crate::handlers::utils::send_reply;

/// Подтверждение собранной брони: проверка занятости, запись в календарь,
/// уведомление оператора.
///
/// Проверка и вставка не связаны блокировкой: две одновременные брони
/// пересекающихся слотов из разных чатов могут обе пройти проверку.
/// Для одной площадки с редкими бронями это принятое ограничение.
pub(crate) async fn finalize_booking(
    bot: &Bot,
    chat_id: ChatId,
    state: &BotState,
    mut session: BookingSession,
    schedule: Schedule,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(booking) = Booking::from_session(&session, schedule) else {
        log::error!("Finalize with incomplete session for chat {chat_id}");
        session.reset();
        state.save_session(chat_id, session).await;
        bot.send_message(chat_id, engine::MSG_IDLE_HINT).await?;
        return Ok(());
    };

    // Брони на весь день не проходят проверку занятости
    if let Some(interval) = booking.schedule.interval() {
        let calendar: &dyn CalendarApi = state.calendar.as_ref();
        if !is_slot_available(calendar, booking.date, interval, booking.room).await {
            bot.send_message(chat_id, engine::MSG_SLOT_TAKEN).await?;
            session.rewind_to_time_selection();
            state.save_session(chat_id, session).await;
            send_reply(
                bot,
                chat_id,
                Reply::with_keyboard(engine::PROMPT_START_TIME, KeyboardKind::StartTimes),
            )
            .await?;
            return Ok(());
        }
    }

    let payload = booking::compose_event(&booking);
    let notification = booking::compose_notification(&booking);

    let submitted: Result<(), Box<dyn Error + Send + Sync>> = async {
        state.calendar.insert_event(&payload).await?;
        bot.send_message(state.config.admin_chat_id, notification)
            .parse_mode(ParseMode::Markdown)
            .await?;
        Ok(())
    }
    .await;

    match submitted {
        Ok(()) => {
            log::info!("Booking confirmed for chat {chat_id}: {}", payload.summary);
            session.reset();
            state.save_session(chat_id, session).await;
            bot.send_message(chat_id, engine::MSG_BOOKED_OK).await?;
        }
        Err(e) => {
            log::error!("Error processing booking for chat {chat_id}: {e}");
            // Шаг не меняем: пользователь может повторить ту же попытку
            state.save_session(chat_id, session).await;
            bot.send_message(chat_id, engine::MSG_BOOKING_FAILED).await?;
        }
    }
    Ok(())
}
