use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Room, Schedule, SlotChoice, TimeInterval};

/// Шаг диалога бронирования.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Idle,
    AskName,
    AskContact,
    AskAppointment,
    ChooseRoom,
    AskDate,
    ChooseStartTime,
    ChooseTimeSlot,
    AskCustomTime,
}

/// Состояние диалога бронирования одного чата.
///
/// Ещё не собранные поля держат None или пустую строку; поля помещения
/// и времени имеют смысл только начиная с соответствующего шага.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSession {
    pub step: Step,
    pub client_name: String,
    pub contact_info: String,
    pub appointment_title: String,
    pub room: Option<Room>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub slot_choice: Option<SlotChoice>,
    pub custom_interval: Option<TimeInterval>,
}

impl BookingSession {
    /// Начало нового бронирования по /book: все прежние данные сбрасываются.
    pub fn begin(&mut self) {
        *self = Self {
            step: Step::AskName,
            ..Self::default()
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Расписание из собранных полей; None, пока выбор времени не завершён.
    pub fn schedule(&self) -> Option<Schedule> {
        match self.slot_choice? {
            SlotChoice::WholeDay => Some(Schedule::WholeDay),
            SlotChoice::Custom => self.custom_interval.map(Schedule::Custom),
            SlotChoice::Preset(duration) => self
                .start_time
                .map(|start| Schedule::Preset { start, duration }),
        }
    }

    /// Возврат к выбору времени после конфликта слота.
    /// Имя, контакт, мероприятие, помещение и дата сохраняются.
    pub fn rewind_to_time_selection(&mut self) {
        self.step = Step::ChooseStartTime;
        self.start_time = None;
        self.slot_choice = None;
        self.custom_interval = None;
    }
}
