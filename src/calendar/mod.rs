pub mod availability;
pub mod client;
pub mod types;

pub use availability::{is_slot_available, slot_is_free};
pub use client::{CalendarApi, CalendarError, GoogleCalendar};
pub use types::{CalendarEvent, EventPayload, EventTime, TIME_ZONE};
