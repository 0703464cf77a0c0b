//! Gregorian -> Chinese lunar conversion.
//!
//! Table-driven for the lunar months (packed 1900..=2100 table in
//! [`data`]), astronomical for the 24 solar terms ([`term`]). The public
//! entry point is [`solar_to_lunar`]: a pure, deterministic function with
//! no side effects, returning `None` outside the supported range.

mod data;
mod term;

use chrono::{Datelike, NaiveDate};

pub use data::{FIRST_YEAR, LAST_YEAR};
pub use term::solar_term;

/// First day covered by the table: lunar 1900-01-01.
const BASE_YEAR: i32 = 1900;
const BASE_MONTH: u32 = 1;
const BASE_DAY: u32 = 31;

const MONTH_NAMES: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月",
    "七月", "八月", "九月", "十月", "冬月", "腊月",
];

const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十",
    "十一", "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十",
    "廿一", "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Lunar counterpart of a Gregorian date.
#[derive(Debug, Clone, PartialEq)]
pub struct LunarInfo {
    pub year: i32,
    /// Lunar month 1..=12; a leap month repeats its predecessor's number.
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
    /// Month name, e.g. `正月` or `闰二月`.
    pub month_cn: String,
    /// Day name, e.g. `初一` or `廿九`.
    pub day_cn: &'static str,
    /// Gregorian-date festival, e.g. `元旦`.
    pub festival: Option<&'static str>,
    /// Lunar-date festival, e.g. `春节`.
    pub lunar_festival: Option<&'static str>,
    /// Solar term falling on this date, e.g. `冬至`.
    pub term: Option<&'static str>,
}

impl LunarInfo {
    /// The one annotation the calendar surfaces for this day, taken from
    /// the sources in fixed priority order. Collisions fall back, they do
    /// not combine.
    pub fn highlight(&self) -> Option<&'static str> {
        [self.festival, self.lunar_festival, self.term]
            .into_iter()
            .flatten()
            .next()
    }

    /// Label for the lunar line of a calendar cell: day name, except the
    /// first day of a lunar month shows the month name.
    pub fn label(&self) -> &str {
        if self.day == 1 {
            &self.month_cn
        } else {
            self.day_cn
        }
    }
}

fn solar_festival(month: u32, day: u32) -> Option<&'static str> {
    match (month, day) {
        (1, 1) => Some("元旦"),
        (2, 14) => Some("情人节"),
        (3, 8) => Some("妇女节"),
        (3, 12) => Some("植树节"),
        (4, 1) => Some("愚人节"),
        (5, 1) => Some("劳动节"),
        (5, 4) => Some("青年节"),
        (6, 1) => Some("儿童节"),
        (7, 1) => Some("建党节"),
        (8, 1) => Some("建军节"),
        (9, 10) => Some("教师节"),
        (10, 1) => Some("国庆节"),
        (12, 24) => Some("平安夜"),
        (12, 25) => Some("圣诞节"),
        _ => None,
    }
}

fn lunar_festival(month: u32, day: u32, is_leap: bool, month_len: u32) -> Option<&'static str> {
    if is_leap {
        return None;
    }
    if month == 12 && day == month_len {
        return Some("除夕");
    }
    match (month, day) {
        (1, 1) => Some("春节"),
        (1, 15) => Some("元宵节"),
        (2, 2) => Some("龙抬头"),
        (5, 5) => Some("端午节"),
        (7, 7) => Some("七夕节"),
        (7, 15) => Some("中元节"),
        (8, 15) => Some("中秋节"),
        (9, 9) => Some("重阳节"),
        (12, 8) => Some("腊八节"),
        (12, 23) => Some("小年"),
        _ => None,
    }
}

/// Convert a Gregorian date to its lunar counterpart.
///
/// Returns `None` before 1900-01-31 or past the end of lunar year 2100.
pub fn solar_to_lunar(date: NaiveDate) -> Option<LunarInfo> {
    let base = NaiveDate::from_ymd_opt(BASE_YEAR, BASE_MONTH, BASE_DAY).unwrap();
    let mut offset = date.signed_duration_since(base).num_days();
    if offset < 0 {
        return None;
    }

    let mut year = data::FIRST_YEAR;
    loop {
        if year > data::LAST_YEAR {
            return None;
        }
        let days = i64::from(data::year_days(year));
        if offset < days {
            break;
        }
        offset -= days;
        year += 1;
    }

    let leap = data::leap_month(year);
    let mut month = 1;
    let mut is_leap = false;
    let mut month_len;
    loop {
        month_len = data::month_days(year, month);
        if offset < i64::from(month_len) {
            break;
        }
        offset -= i64::from(month_len);
        if leap != 0 && month == leap && !is_leap {
            // the leap month follows its namesake
            let extra = data::leap_days(year);
            if offset < i64::from(extra) {
                is_leap = true;
                month_len = extra;
                break;
            }
            offset -= i64::from(extra);
        }
        month += 1;
    }

    let day = offset as u32 + 1;
    let month_name = MONTH_NAMES[(month - 1) as usize];
    let month_cn = if is_leap {
        format!("闰{month_name}")
    } else {
        month_name.to_string()
    };

    Some(LunarInfo {
        year,
        month,
        day,
        is_leap_month: is_leap,
        month_cn,
        day_cn: DAY_NAMES[(day - 1) as usize],
        festival: solar_festival(date.month(), date.day()),
        lunar_festival: lunar_festival(month, day, is_leap, month_len),
        term: term::solar_term(date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lunar(y: i32, m: u32, day: u32) -> LunarInfo {
        solar_to_lunar(d(y, m, day)).unwrap()
    }

    #[test]
    fn base_date_is_first_day_of_1900() {
        let info = lunar(1900, 1, 31);
        assert_eq!((info.year, info.month, info.day), (1900, 1, 1));
        assert!(!info.is_leap_month);
    }

    #[test]
    fn spring_festival_2024() {
        let info = lunar(2024, 2, 10);
        assert_eq!((info.year, info.month, info.day), (2024, 1, 1));
        assert_eq!(info.lunar_festival, Some("春节"));
        assert_eq!(info.day_cn, "初一");
        // first-of-month cells display the month name
        assert_eq!(info.label(), "正月");
    }

    #[test]
    fn new_years_eve_2024() {
        // the day before Spring Festival 2024: last day of a 30-day month 12
        let info = lunar(2024, 2, 9);
        assert_eq!((info.year, info.month, info.day), (2023, 12, 30));
        assert_eq!(info.lunar_festival, Some("除夕"));
        assert_eq!(info.day_cn, "三十");
    }

    #[test]
    fn mid_autumn_2024() {
        let info = lunar(2024, 9, 17);
        assert_eq!((info.year, info.month, info.day), (2024, 8, 15));
        assert_eq!(info.lunar_festival, Some("中秋节"));
    }

    #[test]
    fn dragon_boat_2024() {
        let info = lunar(2024, 6, 10);
        assert_eq!((info.year, info.month, info.day), (2024, 5, 5));
        assert_eq!(info.lunar_festival, Some("端午节"));
    }

    #[test]
    fn leap_second_month_2023() {
        let info = lunar(2023, 3, 22);
        assert_eq!((info.year, info.month, info.day), (2023, 2, 1));
        assert!(info.is_leap_month);
        assert_eq!(info.month_cn, "闰二月");
        assert_eq!(info.label(), "闰二月");
        // no festivals inside a leap month
        assert_eq!(info.lunar_festival, None);
    }

    #[test]
    fn ordinary_days_use_day_names() {
        let info = lunar(2024, 2, 1);
        assert_eq!((info.year, info.month, info.day), (2023, 12, 22));
        assert_eq!(info.label(), "廿二");

        let info = lunar(2025, 10, 1);
        assert_eq!((info.year, info.month, info.day), (2025, 8, 10));
        assert_eq!(info.day_cn, "初十");
    }

    #[test]
    fn spring_festival_2025() {
        let info = lunar(2025, 1, 29);
        assert_eq!((info.year, info.month, info.day), (2025, 1, 1));
    }

    #[test]
    fn out_of_range_dates() {
        assert!(solar_to_lunar(d(1900, 1, 30)).is_none());
        assert!(solar_to_lunar(d(1899, 12, 31)).is_none());
        // last table year still resolves
        assert!(solar_to_lunar(d(2100, 12, 31)).is_some());
    }

    #[test]
    fn solar_festival_on_gregorian_date() {
        let info = lunar(2024, 1, 1);
        assert_eq!(info.festival, Some("元旦"));
        assert_eq!(info.highlight(), Some("元旦"));

        let info = lunar(2024, 10, 1);
        assert_eq!(info.festival, Some("国庆节"));
    }

    #[test]
    fn highlight_prefers_festival_over_term() {
        // 2024-02-10 is Spring Festival; no solar festival, no term that day
        let info = lunar(2024, 2, 10);
        assert_eq!(info.highlight(), Some("春节"));

        // a plain term day falls back to the term
        let info = lunar(2024, 12, 21);
        assert_eq!(info.festival, None);
        assert_eq!(info.lunar_festival, None);
        assert_eq!(info.highlight(), Some("冬至"));
    }
}
