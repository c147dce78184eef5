use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    BookingSession, ButtonAction, Schedule, SlotChoice, Step, TimeInterval,
};

pub const MSG_IDLE_HINT: &str = "Пожалуйста, нажмите /start для начала бронирования.";
pub const PROMPT_START_TIME: &str = "Выберите время начала (с 9:00 до 22:00):";
pub const MSG_SLOT_TAKEN: &str =
    "Извините, это время уже забронировано. Пожалуйста, выберите другое время.";
pub const MSG_BOOKED_OK: &str = "Спасибо, мы свяжемся с вами в течение суток. \
    Если вы не получили от нас ответа, пишите на @dushepolezno_work";
pub const MSG_BOOKING_FAILED: &str = "Произошла ошибка при бронировании. \
    Пожалуйста, попробуйте еще раз или свяжитесь с менеджером.";

const PROMPT_NAME: &str = "Для начала, введите ваше имя.";
const PROMPT_CONTACT: &str =
    "Спасибо! Теперь, пожалуйста, введите ваш телефон в формате +7(900)1234567.";
const PROMPT_APPOINTMENT: &str =
    "Отлично! Теперь введите название вашего мероприятия или цель бронирования.";
const PROMPT_ROOM: &str = "Выберите, пожалуйста, помещение:";
const PROMPT_DATE: &str =
    "Пожалуйста, введите дату бронирования в формате ДД/ММ/ГГГГ (например, 13/03/2025).";
const PROMPT_DATE_FORMAT: &str =
    "Пожалуйста, введите дату в формате ДД/ММ/ГГГГ (например, 13/03/2025).";
const PROMPT_DATE_PAST: &str = "Пожалуйста, выберите дату не раньше сегодняшнего дня.";
const PROMPT_CUSTOM_TIME: &str =
    "Пожалуйста, введите начальное и конечное время в формате ЧЧ:ММ-ЧЧ:ММ (например, 09:00-11:30).";
const PROMPT_CUSTOM_TIME_FORMAT: &str =
    "Пожалуйста, введите время в формате ЧЧ:ММ-ЧЧ:ММ (например, 09:00-11:30).";

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("valid regex"));

/// Входящий ход диалога: текст сообщения или нажатая кнопка.
#[derive(Debug, Clone, Copy)]
pub enum TurnInput<'a> {
    Text(&'a str),
    Button(ButtonAction),
}

/// Клавиатура, которую нужно показать вместе с ответом.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardKind {
    Rooms,
    StartTimes,
    Durations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<KeyboardKind>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: KeyboardKind) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Результат хода: ответ пользователю, готовая к подтверждению бронь
/// или молчаливый пропуск нераспознанной кнопки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Reply(Reply),
    Finalize(Schedule),
    Ignored,
}

/// Продвигает диалог на один ход. Никакого ввода-вывода: проверка даты
/// опирается на переданное `today`, подтверждение брони выполняет вызывающий.
pub fn advance(session: &mut BookingSession, input: TurnInput<'_>, today: NaiveDate) -> TurnOutcome {
    match input {
        TurnInput::Text(text) => advance_text(session, text, today),
        TurnInput::Button(action) => advance_button(session, action),
    }
}

fn advance_text(session: &mut BookingSession, text: &str, today: NaiveDate) -> TurnOutcome {
    let text = text.trim();
    match session.step {
        Step::AskName => {
            if text.is_empty() {
                return TurnOutcome::Reply(Reply::text(PROMPT_NAME));
            }
            session.client_name = text.to_string();
            session.step = Step::AskContact;
            TurnOutcome::Reply(Reply::text(PROMPT_CONTACT))
        }
        Step::AskContact => {
            if text.is_empty() {
                return TurnOutcome::Reply(Reply::text(PROMPT_CONTACT));
            }
            session.contact_info = text.to_string();
            session.step = Step::AskAppointment;
            TurnOutcome::Reply(Reply::text(PROMPT_APPOINTMENT))
        }
        Step::AskAppointment => {
            if text.is_empty() {
                return TurnOutcome::Reply(Reply::text(PROMPT_APPOINTMENT));
            }
            session.appointment_title = text.to_string();
            session.step = Step::ChooseRoom;
            TurnOutcome::Reply(Reply::with_keyboard(PROMPT_ROOM, KeyboardKind::Rooms))
        }
        Step::AskDate => {
            let Some(date) = parse_booking_date(text) else {
                return TurnOutcome::Reply(Reply::text(PROMPT_DATE_FORMAT));
            };
            if date < today {
                return TurnOutcome::Reply(Reply::text(PROMPT_DATE_PAST));
            }
            session.date = Some(date);
            session.step = Step::ChooseStartTime;
            TurnOutcome::Reply(Reply::with_keyboard(
                PROMPT_START_TIME,
                KeyboardKind::StartTimes,
            ))
        }
        Step::AskCustomTime => {
            let Some(interval) = TimeInterval::parse_range(text) else {
                return TurnOutcome::Reply(Reply::text(PROMPT_CUSTOM_TIME_FORMAT));
            };
            session.custom_interval = Some(interval);
            session.slot_choice = Some(SlotChoice::Custom);
            match session.schedule() {
                Some(schedule) => TurnOutcome::Finalize(schedule),
                None => TurnOutcome::Reply(Reply::text(PROMPT_CUSTOM_TIME_FORMAT)),
            }
        }
        // Idle и шаги с кнопками: свободный текст возвращает подсказку
        _ => TurnOutcome::Reply(Reply::text(MSG_IDLE_HINT)),
    }
}

fn advance_button(session: &mut BookingSession, action: ButtonAction) -> TurnOutcome {
    match (session.step, action) {
        (Step::ChooseRoom, ButtonAction::Room(room)) => {
            session.room = Some(room);
            session.step = Step::AskDate;
            TurnOutcome::Reply(Reply::text(PROMPT_DATE))
        }
        (Step::ChooseStartTime, ButtonAction::StartTime(time)) => {
            session.start_time = Some(time);
            session.step = Step::ChooseTimeSlot;
            TurnOutcome::Reply(Reply::with_keyboard(
                format!(
                    "Выбрано время начала: {}. Выберите продолжительность:",
                    time.format("%H:%M")
                ),
                KeyboardKind::Durations,
            ))
        }
        (Step::ChooseTimeSlot, ButtonAction::Slot(choice)) => match choice {
            SlotChoice::Custom => {
                session.step = Step::AskCustomTime;
                TurnOutcome::Reply(Reply::text(PROMPT_CUSTOM_TIME))
            }
            SlotChoice::WholeDay => {
                session.slot_choice = Some(SlotChoice::WholeDay);
                TurnOutcome::Finalize(Schedule::WholeDay)
            }
            SlotChoice::Preset(duration) => {
                // Продолжительность без выбранного начала не имеет смысла
                let Some(start) = session.start_time else {
                    return TurnOutcome::Ignored;
                };
                session.slot_choice = Some(choice);
                TurnOutcome::Finalize(Schedule::Preset { start, duration })
            }
        },
        // Кнопка не соответствует текущему шагу
        _ => TurnOutcome::Ignored,
    }
}

/// Разбор даты `ДД/ММ/ГГГГ`; несуществующие даты (32/01/2025)
/// отклоняются наравне с неверным форматом.
fn parse_booking_date(text: &str) -> Option<NaiveDate> {
    if !DATE_RE.is_match(text) {
        return None;
    }
    let mut parts = text.split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
