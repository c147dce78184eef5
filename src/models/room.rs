use serde::{Deserialize, Serialize};

/// Помещения пространства.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Room {
    Cabinet13,
    Hall17,
}

impl Room {
    /// Метка помещения в поле summary календарного события.
    ///
    /// Календарь не имеет структурированного поля для помещения, поэтому
    /// события различаются только по этой подстроке. Формирование и поиск
    /// метки идут только через этот метод.
    pub fn tag(&self) -> &'static str {
        match self {
            Room::Cabinet13 => "[Кабинет 13м²]",
            Room::Hall17 => "[Зал 17м²]",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Room::Cabinet13 => "Кабинет 13м²",
            Room::Hall17 => "Зал 17м²",
        }
    }

    /// Цвет события в Google Calendar: 11 — красный, 6 — оранжевый.
    pub fn color_id(&self) -> &'static str {
        match self {
            Room::Cabinet13 => "11",
            Room::Hall17 => "6",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Room::Cabinet13 => "Кабинет (13м²)",
            Room::Hall17 => "Зал (17м²)",
        }
    }

    pub fn callback_value(&self) -> &'static str {
        match self {
            Room::Cabinet13 => "cabinet13",
            Room::Hall17 => "hall17",
        }
    }

    pub fn from_callback(value: &str) -> Option<Self> {
        match value {
            "cabinet13" => Some(Room::Cabinet13),
            "hall17" => Some(Room::Hall17),
            _ => None,
        }
    }
}
