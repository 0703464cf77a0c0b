mod config;
mod tui;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use rili_core::{
    build_grid, CalendarCell, CancelToken, HolidayMap, HolidayRepository, HttpHolidayTransport,
    GRID_COLUMNS,
};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const WEEKDAY_LABELS: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];
const CELL_WIDTH: usize = 10;

#[derive(Parser)]
#[command(name = "rili")]
#[command(about = "农历与节假日终端日历", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print one month as a plain-text grid
    Show {
        /// Gregorian year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Month 1-12 (defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// List the official holidays and adjusted workdays of a year
    Holidays {
        /// Gregorian year (defaults to the current year)
        year: Option<i32>,
    },
    /// Open the interactive calendar
    Tui,
}

#[derive(Tabled)]
struct HolidayRow {
    #[tabled(rename = "日期")]
    date: String,
    #[tabled(rename = "类型")]
    kind: &'static str,
    #[tabled(rename = "名称")]
    name: String,
    #[tabled(rename = "工资倍数")]
    wage: String,
    #[tabled(rename = "说明")]
    description: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Some(Commands::Show { year, month }) => show_month(&config, year, month),
        Some(Commands::Holidays { year }) => list_holidays(&config, year),
        Some(Commands::Tui) | None => tui::run(&config),
    }
}

fn fetch_or_warn(config: &Config, year: i32) -> Arc<HolidayMap> {
    let mut repo = HolidayRepository::new(HttpHolidayTransport::new(&config.endpoint));
    match repo.fetch_holidays(year, &CancelToken::new()) {
        Ok(map) => map,
        Err(err) => {
            // the grid still renders, just without holiday annotations
            eprintln!("节假日数据加载失败：{err}");
            Arc::new(HolidayMap::new())
        }
    }
}

fn show_month(config: &Config, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let today = Local::now().date_naive();
    let focus = NaiveDate::from_ymd_opt(
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| today.month()),
        1,
    )
    .context("无效的年份或月份")?;

    let holidays = fetch_or_warn(config, focus.year());
    let cells = build_grid(focus, &holidays, today);

    println!("{} 年 {} 月", focus.year(), focus.month());
    println!("{}", WEEKDAY_LABELS.map(|l| pad(l, CELL_WIDTH)).join(""));

    for week in cells.chunks(GRID_COLUMNS) {
        let days: Vec<String> = week.iter().map(|c| pad(&day_label(c), CELL_WIDTH)).collect();
        let lunar: Vec<String> = week
            .iter()
            .map(|c| pad(&lunar_label(c), CELL_WIDTH))
            .collect();
        println!("{}", days.join(""));
        println!("{}", lunar.join(""));
    }

    Ok(())
}

fn day_label(cell: &CalendarCell) -> String {
    let mut label = if cell.is_today {
        format!("[{}]", cell.date.day())
    } else {
        format!("{}", cell.date.day())
    };
    if let Some(holiday) = &cell.holiday {
        label.push_str(if holiday.is_holiday { " 休" } else { " 班" });
    }
    label
}

fn lunar_label(cell: &CalendarCell) -> String {
    if !cell.is_current_month {
        return String::new();
    }
    match &cell.highlight {
        Some(highlight) => highlight.clone(),
        None => cell.lunar_label.clone(),
    }
}

/// Pad to a fixed display width, counting CJK characters as two columns.
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let fill = width.saturating_sub(used);
    format!("{}{}", text, " ".repeat(fill))
}

fn list_holidays(config: &Config, year: Option<i32>) -> Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    let holidays = fetch_or_warn(config, year);

    if holidays.is_empty() {
        println!("{year} 年暂无节假日数据。");
        return Ok(());
    }

    let mut records: Vec<_> = holidays.values().cloned().collect();
    records.sort_by(|a, b| a.date.cmp(&b.date));

    let rows: Vec<HolidayRow> = records
        .into_iter()
        .map(|record| HolidayRow {
            date: record.date,
            kind: if record.is_holiday { "休" } else { "班" },
            name: record.name,
            wage: record
                .wage_multiplier
                .map(|w| format!("{w}x"))
                .unwrap_or_else(|| "-".to_string()),
            description: record.description.unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}
