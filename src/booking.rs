use chrono::{Duration, NaiveDate};

use crate::calendar::{EventPayload, EventTime};
use crate::models::{BookingSession, Room, Schedule};

/// Завершённая бронь: все поля собраны, расписание определено.
#[derive(Debug, Clone)]
pub struct Booking {
    pub client_name: String,
    pub contact_info: String,
    pub appointment_title: String,
    pub room: Room,
    pub date: NaiveDate,
    pub schedule: Schedule,
}

impl Booking {
    /// Сборка брони из сессии; None, если обязательные поля ещё не заполнены.
    pub fn from_session(session: &BookingSession, schedule: Schedule) -> Option<Self> {
        Some(Self {
            client_name: session.client_name.clone(),
            contact_info: session.contact_info.clone(),
            appointment_title: session.appointment_title.clone(),
            room: session.room?,
            date: session.date?,
            schedule,
        })
    }
}

/// Событие календаря для подтверждённой брони.
pub fn compose_event(booking: &Booking) -> EventPayload {
    let summary = format!(
        "{} - {} {}",
        booking.appointment_title,
        booking.client_name,
        booking.room.tag()
    );
    let description = format!(
        "\nИмя клиента: {}\nНазвание мероприятия: {}",
        booking.client_name, booking.appointment_title
    );
    let (start, end) = match booking.schedule {
        Schedule::WholeDay => (
            EventTime::whole_day(booking.date),
            EventTime::whole_day(booking.date),
        ),
        Schedule::Preset { start, duration } => (
            EventTime::local(booking.date, start),
            EventTime::local(booking.date, start + Duration::minutes(duration.minutes())),
        ),
        Schedule::Custom(interval) => (
            EventTime::local(booking.date, interval.start),
            EventTime::local(booking.date, interval.end),
        ),
    };
    EventPayload {
        summary,
        description,
        start,
        end,
        color_id: booking.room.color_id().to_string(),
    }
}

/// Уведомление оператору о новой брони.
pub fn compose_notification(booking: &Booking) -> String {
    let time_info = match booking.schedule {
        Schedule::WholeDay => "Весь день".to_string(),
        Schedule::Preset { start, duration } => format!(
            "Начало: {}, Продолжительность: {}",
            start.format("%H:%M"),
            duration.label()
        ),
        Schedule::Custom(interval) => format!(
            "Время: {}-{}",
            interval.start.format("%H:%M"),
            interval.end.format("%H:%M")
        ),
    };
    format!(
        "🔔 *Новое бронирование ожидает подтверждения и оплаты*\n\n\
         👤 *Имя клиента:* {}\n\
         📞 *Контакт:* {}\n\
         📝 *Название:* {}\n\
         🏢 *Помещение:* {}\n\
         📅 *Дата:* {}\n\
         ⏰ *Время:* {}",
        booking.client_name,
        booking.contact_info,
        booking.appointment_title,
        booking.room.name(),
        booking.date.format("%d/%m/%Y"),
        time_info,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PresetDuration, TimeInterval};
    use chrono::NaiveTime;

    fn booking(schedule: Schedule) -> Booking {
        Booking {
            client_name: "Анна".to_string(),
            contact_info: "+7(900)1234567".to_string(),
            appointment_title: "Лекция".to_string(),
            room: Room::Cabinet13,
            date: NaiveDate::from_ymd_opt(2025, 3, 13).unwrap(),
            schedule,
        }
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn preset_booking_round_trip() {
        let payload = compose_event(&booking(Schedule::Preset {
            start: time(10, 0),
            duration: PresetDuration::OneHour,
        }));
        assert_eq!(payload.summary, "Лекция - Анна [Кабинет 13м²]");
        assert_eq!(
            payload.start.date_time.as_deref(),
            Some("2025-03-13T10:00:00")
        );
        assert_eq!(payload.end.date_time.as_deref(), Some("2025-03-13T11:00:00"));
        assert_eq!(payload.start.time_zone.as_deref(), Some("Europe/Moscow"));
        assert_eq!(payload.color_id, "11");

        let notification = compose_notification(&booking(Schedule::Preset {
            start: time(10, 0),
            duration: PresetDuration::OneHour,
        }));
        assert!(notification.contains("Начало: 10:00, Продолжительность: 1 час"));
        assert!(notification.contains("*Дата:* 13/03/2025"));
        assert!(notification.contains("*Помещение:* Кабинет 13м²"));
        assert!(notification.contains("*Контакт:* +7(900)1234567"));
    }

    #[test]
    fn whole_day_booking_omits_time_of_day() {
        let payload = compose_event(&booking(Schedule::WholeDay));
        assert_eq!(payload.start.date.as_deref(), Some("2025-03-13"));
        assert_eq!(payload.end.date.as_deref(), Some("2025-03-13"));
        assert!(payload.start.date_time.is_none());
        assert!(payload.end.date_time.is_none());

        let notification = compose_notification(&booking(Schedule::WholeDay));
        assert!(notification.contains("*Время:* Весь день"));
    }

    #[test]
    fn custom_interval_is_reported_as_range() {
        let schedule = Schedule::Custom(TimeInterval {
            start: time(9, 0),
            end: time(11, 30),
        });
        let payload = compose_event(&booking(schedule));
        assert_eq!(
            payload.start.date_time.as_deref(),
            Some("2025-03-13T09:00:00")
        );
        assert_eq!(payload.end.date_time.as_deref(), Some("2025-03-13T11:30:00"));

        let notification = compose_notification(&booking(schedule));
        assert!(notification.contains("*Время:* Время: 09:00-11:30"));
    }

    #[test]
    fn description_lists_client_and_title() {
        let payload = compose_event(&booking(Schedule::WholeDay));
        assert_eq!(
            payload.description,
            "\nИмя клиента: Анна\nНазвание мероприятия: Лекция"
        );
    }

    #[test]
    fn incomplete_session_does_not_build_a_booking() {
        let session = BookingSession::default();
        assert!(Booking::from_session(&session, Schedule::WholeDay).is_none());
    }
}
