use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One entry of the remote year payload, as the endpoint serves it.
///
/// `holiday: true` marks a legal rest day; `false` marks a weekend that was
/// redesignated as a workday to compensate for a holiday elsewhere. `target`
/// and `after` describe which holiday an adjusted workday belongs to and
/// whether it falls before or after it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawHolidayEntry {
    pub date: String,
    pub name: String,
    pub holiday: bool,
    pub wage: Option<f64>,
    pub target: Option<String>,
    pub after: Option<bool>,
}

/// Response body of `GET {base}/{year}`. `code == 0` is success; any other
/// value is an upstream failure even when the HTTP status was 200.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YearResponse {
    pub code: i32,
    #[serde(default)]
    pub holiday: Option<HashMap<String, RawHolidayEntry>>,
}

/// Normalized record for a single calendar date. At most one exists per
/// date, and `is_holiday` / `is_adjusted_workday` are mutually exclusive by
/// construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HolidayRecord {
    /// ISO `YYYY-MM-DD` string, the unique key.
    pub date: String,
    pub name: String,
    pub is_holiday: bool,
    pub is_adjusted_workday: bool,
    /// Source-provided pay multiplier, informational only.
    pub wage_multiplier: Option<f64>,
    /// Set only for adjusted workdays: which holiday this day compensates
    /// for, and whether it precedes or follows it.
    pub description: Option<String>,
}

/// ISO date string -> record, one map per fetched year. Immutable once
/// produced; lookup by key only.
pub type HolidayMap = HashMap<String, HolidayRecord>;

fn describe_adjustment(raw: &RawHolidayEntry) -> String {
    let target = match &raw.target {
        Some(t) => t,
        None => return "调休工作日".to_string(),
    };

    let position = match raw.after {
        Some(false) => "假期前",
        Some(true) => "假期后",
        None => "",
    };

    if position.is_empty() {
        format!("关联假期：{target}")
    } else {
        format!("{position}·关联假期：{target}")
    }
}

/// Normalize a raw year payload into a [`HolidayMap`].
///
/// Every raw entry yields exactly one record, keyed by its own `date`
/// field. Adjusted workdays get a human-readable description; rest days
/// never do.
pub fn normalize_year(payload: Option<HashMap<String, RawHolidayEntry>>) -> HolidayMap {
    let Some(payload) = payload else {
        return HolidayMap::new();
    };

    payload
        .into_values()
        .map(|raw| {
            let description = if raw.holiday {
                None
            } else {
                Some(describe_adjustment(&raw))
            };
            let record = HolidayRecord {
                date: raw.date.clone(),
                name: raw.name,
                is_holiday: raw.holiday,
                is_adjusted_workday: !raw.holiday,
                wage_multiplier: raw.wage,
                description,
            };
            (raw.date, record)
        })
        .collect()
}
