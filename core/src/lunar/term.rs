//! The 24 solar terms, computed from the sun's apparent longitude.
//!
//! A term is the instant the apparent geocentric solar longitude reaches a
//! multiple of 15 degrees. Instants are solved with a low-precision solar
//! theory (good to well under a minute over 1900..=2100), converted from
//! dynamical time to UT, and mapped to calendar dates in UTC+8, the
//! reference meridian of the Chinese calendar.

use chrono::{Datelike, NaiveDate};

/// Term names in calendar order starting from the first January term.
const TERM_NAMES: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨",
    "立夏", "小满", "芒种", "夏至", "小暑", "大暑", "立秋", "处暑",
    "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

/// Solar longitude of the first January term (minor cold).
const FIRST_TERM_LONGITUDE: f64 = 285.0;

/// Mean solar motion in degrees per day, used as the Newton step slope.
const MEAN_MOTION: f64 = 0.985_647_3;

/// Julian day number of 0001-01-01 minus one (proleptic Gregorian), so
/// `jd = days_from_ce + JD_CE_OFFSET`.
const JD_CE_OFFSET: f64 = 1_721_424.5;

/// Difference TD - UT in seconds (Espenak/Meeus polynomial fits).
fn delta_t_seconds(year: i32) -> f64 {
    let y = f64::from(year);
    if year < 1920 {
        let t = y - 1900.0;
        -2.79 + 1.494_119 * t - 0.059_893_9 * t * t + 0.006_196_6 * t.powi(3)
            - 0.000_197 * t.powi(4)
    } else if year < 1941 {
        let t = y - 1920.0;
        21.20 + 0.844_93 * t - 0.076_100 * t * t + 0.002_093_6 * t.powi(3)
    } else if year < 1961 {
        let t = y - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986 {
        let t = y - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
    } else if year < 2005 {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060_374 * t * t + 0.001_727_5 * t.powi(3)
            + 0.000_651_814 * t.powi(4)
            + 0.000_023_735_99 * t.powi(5)
    } else if year < 2050 {
        let t = y - 2000.0;
        62.92 + 0.322_17 * t + 0.005_589 * t * t
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    }
}

/// Apparent geocentric solar longitude in degrees for a JDE instant.
fn sun_apparent_longitude(jde: f64) -> f64 {
    let t = (jde - 2_451_545.0) / 36_525.0;
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1934.136 * t).to_radians();
    (l0 + c - 0.005_69 - 0.004_78 * omega.sin()).rem_euclid(360.0)
}

/// Calendar date (UTC+8) of term `n` (0 = minor cold) in a Gregorian year.
fn term_date(year: i32, n: usize) -> NaiveDate {
    let angle = (FIRST_TERM_LONGITUDE + 15.0 * n as f64).rem_euclid(360.0);

    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
    let mut jde = f64::from(jan1.num_days_from_ce()) + JD_CE_OFFSET;
    jde += (angle - sun_apparent_longitude(jde)).rem_euclid(360.0) / MEAN_MOTION;

    for _ in 0..10 {
        let delta = (angle - sun_apparent_longitude(jde) + 180.0).rem_euclid(360.0) - 180.0;
        jde += delta / MEAN_MOTION;
        if delta.abs() < 1e-9 {
            break;
        }
    }

    let jd_cst = jde - delta_t_seconds(year) / 86_400.0 + 8.0 / 24.0;
    let days_from_ce = (jd_cst + 0.5).floor() - 1_721_425.0;
    NaiveDate::from_num_days_from_ce_opt(days_from_ce as i32).unwrap()
}

/// The solar term falling on the given date, if any.
///
/// Each Gregorian month contains exactly two terms, so only those two
/// candidates need solving.
pub fn solar_term(date: NaiveDate) -> Option<&'static str> {
    let first = 2 * (date.month() as usize - 1);
    for n in [first, first + 1] {
        if term_date(date.year(), n) == date {
            return Some(TERM_NAMES[n]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn known_term_dates_2024() {
        assert_eq!(solar_term(d(2024, 1, 6)), Some("小寒"));
        assert_eq!(solar_term(d(2024, 2, 4)), Some("立春"));
        assert_eq!(solar_term(d(2024, 3, 20)), Some("春分"));
        assert_eq!(solar_term(d(2024, 4, 4)), Some("清明"));
        assert_eq!(solar_term(d(2024, 6, 21)), Some("夏至"));
        assert_eq!(solar_term(d(2024, 12, 21)), Some("冬至"));
    }

    #[test]
    fn known_term_dates_other_years() {
        assert_eq!(solar_term(d(2025, 2, 3)), Some("立春"));
        assert_eq!(solar_term(d(2000, 3, 20)), Some("春分"));
        assert_eq!(solar_term(d(1984, 4, 4)), Some("清明"));
    }

    #[test]
    fn plain_days_have_no_term() {
        assert_eq!(solar_term(d(2024, 2, 1)), None);
        assert_eq!(solar_term(d(2024, 5, 1)), None);
        assert_eq!(solar_term(d(2024, 12, 25)), None);
    }

    #[test]
    fn every_month_has_two_terms() {
        for year in [1900, 1950, 2024, 2100] {
            for month in 1..=12u32 {
                let first = 2 * (month as usize - 1);
                for n in [first, first + 1] {
                    let date = term_date(year, n);
                    assert_eq!(date.year(), year, "{year}-{month} term {n}");
                    assert_eq!(date.month(), month, "{year}-{month} term {n}");
                }
            }
        }
    }
}
