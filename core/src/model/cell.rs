use chrono::NaiveDate;

use crate::model::holiday::HolidayRecord;

/// One grid position of the 6x7 month view. Exactly 42 are produced per
/// render, contiguous and strictly increasing by one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Canonical `YYYY-MM-DD` string, stable identity and holiday key.
    pub iso_key: String,
    /// False for padding cells from the adjacent months.
    pub is_current_month: bool,
    pub is_today: bool,
    /// Saturday or Sunday, independent of the Monday grid anchoring.
    pub is_weekend: bool,
    /// Lunar day name, or the lunar month name on the first day of a lunar
    /// month. Empty outside the supported lunar range.
    pub lunar_label: String,
    /// Festival or solar term, absent if none applies.
    pub highlight: Option<String>,
    pub holiday: Option<HolidayRecord>,
    /// Precomputed multi-line description: date, holiday name, holiday
    /// description, highlight, newline joined in that order.
    pub tooltip: String,
}

impl CalendarCell {
    /// The single tag the presentation shows for this cell. A holiday
    /// always wins over a festival/term highlight; adjusted workdays are
    /// collapsed to the fixed marker.
    pub fn display_tag(&self) -> Option<&str> {
        if let Some(holiday) = &self.holiday {
            if holiday.is_holiday {
                return Some(&holiday.name);
            }
            return Some("调休");
        }
        self.highlight.as_deref()
    }
}
