use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Europe::Moscow;
use serde::{Deserialize, Serialize};

/// Часовой пояс площадки; все слоты и события трактуются в нём.
pub const TIME_ZONE: &str = "Europe/Moscow";

/// Начало или конец события: либо момент времени, либо дата
/// для событий на весь день.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventTime {
    pub fn whole_day(date: NaiveDate) -> Self {
        Self {
            date: Some(date.format("%Y-%m-%d").to_string()),
            ..Self::default()
        }
    }

    pub fn local(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date_time: Some(format!(
                "{}T{}:00",
                date.format("%Y-%m-%d"),
                time.format("%H:%M")
            )),
            time_zone: Some(TIME_ZONE.to_string()),
            ..Self::default()
        }
    }

    /// Локальное время в поясе площадки; для событий на весь день — полночь
    /// указанной даты. None, если календарь вернул нечитаемое значение.
    pub fn to_local(&self) -> Option<NaiveDateTime> {
        if let Some(date_time) = &self.date_time {
            let parsed = DateTime::parse_from_rfc3339(date_time).ok()?;
            return Some(parsed.with_timezone(&Moscow).naive_local());
        }
        let date = NaiveDate::parse_from_str(self.date.as_deref()?, "%Y-%m-%d").ok()?;
        Some(date.and_time(NaiveTime::MIN))
    }
}

/// Существующее событие календаря. Принадлежность помещению определяется
/// только по метке в summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
}

/// Тело запроса на вставку события.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
    pub color_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventList {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_value_resolves_to_moscow_local() {
        let time = EventTime {
            date_time: Some("2025-03-13T07:00:00Z".to_string()),
            ..EventTime::default()
        };
        let local = time.to_local().unwrap();
        assert_eq!(local.to_string(), "2025-03-13 10:00:00");
    }

    #[test]
    fn all_day_value_falls_back_to_midnight() {
        let time = EventTime {
            date: Some("2025-03-13".to_string()),
            ..EventTime::default()
        };
        let local = time.to_local().unwrap();
        assert_eq!(local.to_string(), "2025-03-13 00:00:00");
    }

    #[test]
    fn unreadable_value_is_none() {
        assert!(EventTime::default().to_local().is_none());
        let garbage = EventTime {
            date_time: Some("вчера".to_string()),
            ..EventTime::default()
        };
        assert!(garbage.to_local().is_none());
    }
}
