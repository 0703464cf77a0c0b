pub mod cell;
pub mod holiday;

// Re-export
pub use cell::CalendarCell;
pub use holiday::{normalize_year, HolidayMap, HolidayRecord, RawHolidayEntry, YearResponse};
