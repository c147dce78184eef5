pub mod room;
pub mod session;
pub mod slot;

pub use room::Room;
pub use session::{BookingSession, Step};
pub use slot::{ButtonAction, PresetDuration, Schedule, SlotChoice, TimeInterval};
