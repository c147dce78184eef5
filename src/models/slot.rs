use chrono::{Duration, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Room;

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid regex"));
static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}-\d{2}:\d{2}$").expect("valid regex"));

/// Интервал времени в пределах одного дня.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeInterval {
    /// Разбор строки вида `ЧЧ:ММ-ЧЧ:ММ` (например, `09:00-11:30`).
    pub fn parse_range(text: &str) -> Option<Self> {
        if !RANGE_RE.is_match(text) {
            return None;
        }
        let (start, end) = text.split_once('-')?;
        Some(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }
}

/// Разбор времени вида `ЧЧ:ММ` со строгими ведущими нулями.
pub fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    if !TIME_RE.is_match(text) {
        return None;
    }
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Предустановленная продолжительность с клавиатуры.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetDuration {
    OneHour,
    NinetyMinutes,
    TwoHours,
}

impl PresetDuration {
    pub fn minutes(&self) -> i64 {
        match self {
            PresetDuration::OneHour => 60,
            PresetDuration::NinetyMinutes => 90,
            PresetDuration::TwoHours => 120,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PresetDuration::OneHour => "1 час",
            PresetDuration::NinetyMinutes => "1.5 часа",
            PresetDuration::TwoHours => "2 часа",
        }
    }

    pub fn callback_value(&self) -> &'static str {
        match self {
            PresetDuration::OneHour => "1hour",
            PresetDuration::NinetyMinutes => "1.5hours",
            PresetDuration::TwoHours => "2hours",
        }
    }
}

/// Выбор продолжительности на шаге chooseTimeSlot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotChoice {
    Preset(PresetDuration),
    WholeDay,
    Custom,
}

impl SlotChoice {
    pub fn callback_value(&self) -> &'static str {
        match self {
            SlotChoice::Preset(duration) => duration.callback_value(),
            SlotChoice::WholeDay => "wholeDay",
            SlotChoice::Custom => "customTime",
        }
    }

    pub fn from_callback(value: &str) -> Option<Self> {
        match value {
            "1hour" => Some(SlotChoice::Preset(PresetDuration::OneHour)),
            "1.5hours" => Some(SlotChoice::Preset(PresetDuration::NinetyMinutes)),
            "2hours" => Some(SlotChoice::Preset(PresetDuration::TwoHours)),
            "wholeDay" => Some(SlotChoice::WholeDay),
            "customTime" => Some(SlotChoice::Custom),
            _ => None,
        }
    }
}

/// Итоговое расписание подтверждаемой брони.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    WholeDay,
    Preset {
        start: NaiveTime,
        duration: PresetDuration,
    },
    Custom(TimeInterval),
}

impl Schedule {
    /// Запрошенный интервал; None для брони на весь день —
    /// такие брони не проходят проверку занятости.
    pub fn interval(&self) -> Option<TimeInterval> {
        match self {
            Schedule::WholeDay => None,
            Schedule::Preset { start, duration } => Some(TimeInterval {
                start: *start,
                end: *start + Duration::minutes(duration.minutes()),
            }),
            Schedule::Custom(interval) => Some(*interval),
        }
    }
}

/// Закрытый набор значений callback-кнопок.
///
/// Любое значение вне набора отбрасывается при приёме, до обращения
/// к состоянию диалога.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Room(Room),
    StartTime(NaiveTime),
    Slot(SlotChoice),
}

impl ButtonAction {
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(room) = Room::from_callback(data) {
            return Some(ButtonAction::Room(room));
        }
        if let Some(choice) = SlotChoice::from_callback(data) {
            return Some(ButtonAction::Slot(choice));
        }
        parse_hhmm(data).map(ButtonAction::StartTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_custom_range() {
        let interval = TimeInterval::parse_range("09:00-11:30").unwrap();
        assert_eq!(interval.start, time(9, 0));
        assert_eq!(interval.end, time(11, 30));
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(TimeInterval::parse_range("9:00-11:30").is_none());
        assert!(TimeInterval::parse_range("09:00 11:30").is_none());
        assert!(TimeInterval::parse_range("09:00-").is_none());
        assert!(TimeInterval::parse_range("09:00-25:00").is_none());
        assert!(TimeInterval::parse_range("").is_none());
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(parse_hhmm("9:00").is_none());
        assert!(parse_hhmm("24:00").is_none());
        assert!(parse_hhmm("10:60").is_none());
        assert!(parse_hhmm("10-00").is_none());
    }

    #[test]
    fn schedule_interval_for_preset_duration() {
        let schedule = Schedule::Preset {
            start: time(10, 0),
            duration: PresetDuration::NinetyMinutes,
        };
        let interval = schedule.interval().unwrap();
        assert_eq!(interval.start, time(10, 0));
        assert_eq!(interval.end, time(11, 30));
    }

    #[test]
    fn whole_day_has_no_interval() {
        assert!(Schedule::WholeDay.interval().is_none());
    }

    #[test]
    fn button_actions_cover_known_callback_values() {
        assert_eq!(
            ButtonAction::parse("cabinet13"),
            Some(ButtonAction::Room(Room::Cabinet13))
        );
        assert_eq!(
            ButtonAction::parse("hall17"),
            Some(ButtonAction::Room(Room::Hall17))
        );
        assert_eq!(
            ButtonAction::parse("1.5hours"),
            Some(ButtonAction::Slot(SlotChoice::Preset(
                PresetDuration::NinetyMinutes
            )))
        );
        assert_eq!(
            ButtonAction::parse("customTime"),
            Some(ButtonAction::Slot(SlotChoice::Custom))
        );
        assert_eq!(
            ButtonAction::parse("wholeDay"),
            Some(ButtonAction::Slot(SlotChoice::WholeDay))
        );
        assert_eq!(
            ButtonAction::parse("10:00"),
            Some(ButtonAction::StartTime(time(10, 0)))
        );
        assert!(ButtonAction::parse("select_ai_anna").is_none());
        assert!(ButtonAction::parse("").is_none());
    }
}
