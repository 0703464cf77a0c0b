//! Month-grid synthesis: a fixed 6x7 window of annotated day cells.

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

use crate::lunar::solar_to_lunar;
use crate::model::{CalendarCell, HolidayMap, HolidayRecord};

pub const GRID_WEEKS: usize = 6;
pub const GRID_COLUMNS: usize = 7;
/// Fixed grid size, independent of the month length.
pub const GRID_CELLS: usize = GRID_WEEKS * GRID_COLUMNS;

/// Weekday the grid starts on. Weekend detection is independent of this.
pub const WEEK_START: Weekday = Weekday::Mon;

/// First date shown for a focus month: the most recent week-start weekday
/// on or before the 1st. Up to 6 padding days precede the month.
pub fn grid_anchor(focus: NaiveDate) -> NaiveDate {
    let first = focus.with_day(1).unwrap();
    let back = first.weekday().num_days_from_monday();
    first - Duration::days(i64::from(back))
}

/// Number of days in a Gregorian month.
///
/// # Panics
///
/// Panics if `month` is outside `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    assert!((1..=12).contains(&month), "month out of range: {month}");
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.unwrap().pred_opt().unwrap().day()
}

fn tooltip(
    date: NaiveDate,
    holiday: Option<&HolidayRecord>,
    highlight: Option<&str>,
) -> String {
    let mut lines = vec![date.format("%Y年%-m月%-d日").to_string()];

    if let Some(holiday) = holiday {
        lines.push(holiday.name.clone());
        if let Some(description) = &holiday.description {
            lines.push(description.clone());
        }
    }

    if let Some(highlight) = highlight {
        lines.push(format!("节日/节气：{highlight}"));
    }

    lines.join("\n")
}

/// Build the 42-cell view of the month containing `focus`.
///
/// `today` is injected at day granularity so two calls with identical
/// inputs produce identical output.
pub fn build_grid(focus: NaiveDate, holidays: &HolidayMap, today: NaiveDate) -> Vec<CalendarCell> {
    let anchor = grid_anchor(focus);

    (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = anchor + Duration::days(offset);
            let iso_key = date.format("%Y-%m-%d").to_string();
            let holiday = holidays.get(&iso_key).cloned();

            let lunar = solar_to_lunar(date);
            let lunar_label = lunar
                .as_ref()
                .map(|info| info.label().to_string())
                .unwrap_or_default();
            let highlight = lunar.as_ref().and_then(|info| info.highlight());

            CalendarCell {
                date,
                tooltip: tooltip(date, holiday.as_ref(), highlight),
                iso_key,
                is_current_month: date.year() == focus.year() && date.month() == focus.month(),
                is_today: date == today,
                is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
                lunar_label,
                highlight: highlight.map(str::to_string),
                holiday,
            }
        })
        .collect()
}

/// [`build_grid`] against the system's current local date.
pub fn build_grid_now(focus: NaiveDate, holidays: &HolidayMap) -> Vec<CalendarCell> {
    build_grid(focus, holidays, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(date: &str, name: &str, is_holiday: bool, description: Option<&str>) -> HolidayRecord {
        HolidayRecord {
            date: date.to_string(),
            name: name.to_string(),
            is_holiday,
            is_adjusted_workday: !is_holiday,
            wage_multiplier: None,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn anchor_walks_back_to_monday() {
        // 2024-02-01 is a Thursday
        assert_eq!(grid_anchor(d(2024, 2, 1)), d(2024, 1, 29));
        // anchor is the same for any focus day within the month
        assert_eq!(grid_anchor(d(2024, 2, 29)), d(2024, 1, 29));
    }

    #[test]
    fn anchor_is_first_of_month_when_month_starts_on_monday() {
        // 2024-07-01 is a Monday
        assert_eq!(grid_anchor(d(2024, 7, 1)), d(2024, 7, 1));
    }

    #[test]
    fn anchor_walks_back_up_to_six_days() {
        // 2024-09-01 is a Sunday, the furthest case
        assert_eq!(grid_anchor(d(2024, 9, 1)), d(2024, 8, 26));
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    #[should_panic(expected = "month out of range")]
    fn days_in_month_rejects_month_thirteen() {
        days_in_month(2024, 13);
    }

    #[test]
    #[should_panic(expected = "month out of range")]
    fn days_in_month_rejects_month_zero() {
        days_in_month(2024, 0);
    }

    #[test]
    fn today_flag_set_on_exactly_one_cell() {
        let holidays = HolidayMap::new();
        let cells = build_grid(d(2024, 2, 15), &holidays, d(2024, 2, 15));
        let today: Vec<_> = cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].iso_key, "2024-02-15");
    }

    #[test]
    fn today_outside_window_flags_nothing() {
        let holidays = HolidayMap::new();
        let cells = build_grid(d(2024, 2, 15), &holidays, d(2024, 7, 1));
        assert!(cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn weekend_is_saturday_and_sunday_only() {
        let holidays = HolidayMap::new();
        let cells = build_grid(d(2024, 2, 1), &holidays, d(2024, 2, 1));
        for cell in &cells {
            let expect = matches!(cell.date.weekday(), Weekday::Sat | Weekday::Sun);
            assert_eq!(cell.is_weekend, expect, "{}", cell.iso_key);
        }
        // Monday-start columns: weekend cells sit in the last two columns
        for week in cells.chunks(GRID_COLUMNS) {
            assert!(week[..5].iter().all(|c| !c.is_weekend));
            assert!(week[5..].iter().all(|c| c.is_weekend));
        }
    }

    #[test]
    fn holiday_lookup_by_iso_key() {
        let mut holidays = HolidayMap::new();
        holidays.insert(
            "2024-10-01".to_string(),
            record("2024-10-01", "国庆节", true, None),
        );

        let cells = build_grid(d(2024, 10, 1), &holidays, d(2024, 10, 1));
        let cell = cells.iter().find(|c| c.iso_key == "2024-10-01").unwrap();
        let holiday = cell.holiday.as_ref().unwrap();
        assert!(holiday.is_holiday);
        assert_eq!(holiday.name, "国庆节");
        assert_eq!(cell.display_tag(), Some("国庆节"));
    }

    #[test]
    fn tooltip_lines_in_contract_order() {
        let mut holidays = HolidayMap::new();
        holidays.insert(
            "2024-10-12".to_string(),
            record(
                "2024-10-12",
                "国庆节后补班",
                false,
                Some("假期后·关联假期：2024-10-01"),
            ),
        );

        let cells = build_grid(d(2024, 10, 1), &holidays, d(2024, 10, 1));
        let cell = cells.iter().find(|c| c.iso_key == "2024-10-12").unwrap();
        assert_eq!(
            cell.tooltip,
            "2024年10月12日\n国庆节后补班\n假期后·关联假期：2024-10-01"
        );
    }

    #[test]
    fn tooltip_includes_highlight_line() {
        let holidays = HolidayMap::new();
        let cells = build_grid(d(2024, 2, 1), &holidays, d(2024, 2, 1));

        // 2024-02-10 is Spring Festival: lunar festival, no holiday record
        let cell = cells.iter().find(|c| c.iso_key == "2024-02-10").unwrap();
        assert_eq!(cell.highlight.as_deref(), Some("春节"));
        assert_eq!(cell.tooltip, "2024年2月10日\n节日/节气：春节");
        assert_eq!(cell.lunar_label, "正月");
    }

    #[test]
    fn plain_cell_tooltip_is_just_the_date() {
        let holidays = HolidayMap::new();
        let cells = build_grid(d(2024, 2, 1), &holidays, d(2024, 2, 1));
        let cell = cells.iter().find(|c| c.iso_key == "2024-02-01").unwrap();
        assert_eq!(cell.tooltip, "2024年2月1日");
        assert_eq!(cell.lunar_label, "廿二");
    }

    #[test]
    fn output_is_deterministic() {
        let mut holidays = HolidayMap::new();
        holidays.insert(
            "2024-02-10".to_string(),
            record("2024-02-10", "春节", true, None),
        );
        let a = build_grid(d(2024, 2, 1), &holidays, d(2024, 2, 5));
        let b = build_grid(d(2024, 2, 1), &holidays, d(2024, 2, 5));
        assert_eq!(a, b);
    }
}
