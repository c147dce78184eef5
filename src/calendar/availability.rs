use chrono::{NaiveDate, TimeZone};
use chrono_tz::Europe::Moscow;

use super::client::CalendarApi;
use super::types::CalendarEvent;
use crate::models::{Room, TimeInterval};

/// Свободен ли запрошенный слот среди событий этого дня.
///
/// Учитываются только события с меткой нужного помещения в summary;
/// события без summary и события других помещений пропускаются.
/// Интервалы полуоткрытые: брони встык по границе не конфликтуют.
pub fn slot_is_free(
    events: &[CalendarEvent],
    date: NaiveDate,
    interval: TimeInterval,
    room: Room,
) -> bool {
    let requested_start = date.and_time(interval.start);
    let requested_end = date.and_time(interval.end);

    for event in events {
        let Some(summary) = event.summary.as_deref() else {
            continue;
        };
        if !summary.contains(room.tag()) {
            continue;
        }
        let (Some(event_start), Some(event_end)) = (event.start.to_local(), event.end.to_local())
        else {
            continue;
        };
        if requested_start < event_end && requested_end > event_start {
            return false;
        }
    }
    true
}

/// Проверка занятости слота по календарю.
///
/// Сбой листинга трактуется как «занято»: двойная бронь из-за
/// временной ошибки чтения недопустима.
pub async fn is_slot_available<C: CalendarApi + ?Sized>(
    api: &C,
    date: NaiveDate,
    interval: TimeInterval,
    room: Room,
) -> bool {
    let day_start = date
        .and_hms_opt(0, 0, 0)
        .and_then(|dt| Moscow.from_local_datetime(&dt).single());
    let day_end = date
        .and_hms_opt(23, 59, 59)
        .and_then(|dt| Moscow.from_local_datetime(&dt).single());
    let (Some(time_min), Some(time_max)) = (day_start, day_end) else {
        log::error!("Could not build day bounds for {date}");
        return false;
    };

    match api.list_events(time_min, time_max).await {
        Ok(events) => slot_is_free(&events, date, interval, room),
        Err(e) => {
            log::error!("Error checking time slot availability: {e}");
            false
        }
    }
}
