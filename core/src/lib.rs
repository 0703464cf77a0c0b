pub mod error;
pub mod grid;
pub mod lunar;
pub mod model;
pub mod repository;

pub use error::HolidayError;
pub use grid::{build_grid, build_grid_now, days_in_month, grid_anchor, GRID_CELLS, GRID_COLUMNS, GRID_WEEKS};
pub use lunar::{solar_term, solar_to_lunar, LunarInfo};
pub use model::{normalize_year, CalendarCell, HolidayMap, HolidayRecord, RawHolidayEntry, YearResponse};
pub use repository::{fetch_year, CancelToken, HolidayRepository, HolidayTransport, HttpHolidayTransport};
