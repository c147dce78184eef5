use std::error::Error;

use chrono::{NaiveDate, Utc};
use chrono_tz::Europe::Moscow;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::engine::{KeyboardKind, Reply};
use crate::models::{PresetDuration, Room, SlotChoice};

/// Сегодняшняя дата в часовом поясе площадки.
pub fn venue_today() -> NaiveDate {
    Utc::now().with_timezone(&Moscow).date_naive()
}

/// Клавиатура по виду, запрошенному движком диалога.
pub fn make_keyboard(kind: KeyboardKind) -> InlineKeyboardMarkup {
    match kind {
        KeyboardKind::Rooms => make_room_keyboard(),
        KeyboardKind::StartTimes => make_time_keyboard(),
        KeyboardKind::Durations => make_duration_keyboard(),
    }
}

pub fn make_room_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(Room::Cabinet13.button_label(), Room::Cabinet13.callback_value()),
        InlineKeyboardButton::callback(Room::Hall17.button_label(), Room::Hall17.callback_value()),
    ]])
}

/// Время начала с 9:00 до 22:00, по 4 кнопки в ряд.
pub fn make_time_keyboard() -> InlineKeyboardMarkup {
    let mut keyboard: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    let mut row = Vec::new();
    for hour in 9..=22 {
        let label = format!("{hour:02}:00");
        row.push(InlineKeyboardButton::callback(label.clone(), label));
        if row.len() == 4 {
            keyboard.push(std::mem::take(&mut row));
        }
    }
    if !row.is_empty() {
        keyboard.push(row);
    }
    InlineKeyboardMarkup::new(keyboard)
}

pub fn make_duration_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback(
                PresetDuration::OneHour.label(),
                PresetDuration::OneHour.callback_value(),
            ),
            InlineKeyboardButton::callback(
                PresetDuration::NinetyMinutes.label(),
                PresetDuration::NinetyMinutes.callback_value(),
            ),
        ],
        vec![
            InlineKeyboardButton::callback(
                PresetDuration::TwoHours.label(),
                PresetDuration::TwoHours.callback_value(),
            ),
            InlineKeyboardButton::callback("Другое время", SlotChoice::Custom.callback_value()),
        ],
    ])
}

/// Отправка ответа движка с клавиатурой, если она запрошена.
pub async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    reply: Reply,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let request = bot.send_message(chat_id, reply.text);
    match reply.keyboard {
        Some(kind) => request.reply_markup(make_keyboard(kind)).await?,
        None => request.await?,
    };
    Ok(())
}
