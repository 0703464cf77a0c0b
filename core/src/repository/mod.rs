pub mod holiday;
pub mod transport;

// Re-export
pub use holiday::{fetch_year, CancelToken, HolidayRepository};
pub use transport::{HolidayTransport, HttpHolidayTransport};
