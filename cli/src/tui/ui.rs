use chrono::{Datelike, Weekday};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use rili_core::CalendarCell;

use crate::tui::app::App;

const WEEKDAY_LABELS: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];
const HOLIDAY_SOURCE: &str = "节假日数据来源：timor.tech（国务院放假安排）";

fn weekday_cn(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "星期一",
        Weekday::Tue => "星期二",
        Weekday::Wed => "星期三",
        Weekday::Thu => "星期四",
        Weekday::Fri => "星期五",
        Weekday::Sat => "星期六",
        Weekday::Sun => "星期日",
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Toolbar
            Constraint::Length(1), // Hint line
            Constraint::Length(1), // Weekday header
            Constraint::Min(12),   // Grid
            Constraint::Length(1), // Footer
        ])
        .split(size);

    draw_toolbar(f, app, main_chunks[0]);
    draw_hint(f, app, main_chunks[1]);
    draw_weekday_header(f, main_chunks[2]);
    draw_grid(f, app, main_chunks[3]);
    draw_footer(f, main_chunks[4]);
}

fn draw_toolbar(f: &mut Frame, app: &App, area: Rect) {
    let quarter = (app.focus.month() - 1) / 3 + 1;
    let title = format!("{} 年 {} 月", app.focus.year(), app.focus.month());
    let subtext = format!("{} · 第 {} 季度", weekday_cn(app.focus.weekday()), quarter);

    let toolbar = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtext, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" 日历 "),
    );
    f.render_widget(toolbar, area);
}

fn draw_hint(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.loading {
        (
            "正在同步当年节假日信息…".to_string(),
            Style::default().fg(Color::Yellow),
        )
    } else if let Some(err) = &app.error {
        (
            format!("节假日数据加载失败：{err}"),
            Style::default().fg(Color::Red),
        )
    } else {
        (HOLIDAY_SOURCE.to_string(), Style::default().fg(Color::DarkGray))
    };

    let hint = Paragraph::new(text).style(style).alignment(Alignment::Center);
    f.render_widget(hint, area);
}

fn draw_weekday_header(f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 7); 7])
        .split(area);

    for (label, column) in WEEKDAY_LABELS.iter().zip(columns.iter()) {
        // the last two columns are the weekend
        let style = if *label == "周六" || *label == "周日" {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Blue)
        };
        let header = Paragraph::new(*label)
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(header, *column);
    }
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    for (week, row_area) in app.cells.chunks(7).zip(rows.iter()) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 7); 7])
            .split(*row_area);

        for (cell, cell_area) in week.iter().zip(columns.iter()) {
            draw_cell(f, cell, *cell_area);
        }
    }
}

fn tag_style(cell: &CalendarCell) -> Style {
    match &cell.holiday {
        Some(holiday) if holiday.is_holiday => Style::default().fg(Color::Red),
        Some(_) => Style::default().fg(Color::Yellow),
        None => Style::default().fg(Color::Magenta),
    }
}

fn draw_cell(f: &mut Frame, cell: &CalendarCell, area: Rect) {
    let mut day_style = if !cell.is_current_month {
        Style::default().fg(Color::DarkGray)
    } else if cell.is_weekend {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    if cell.is_current_month {
        day_style = day_style.add_modifier(Modifier::BOLD);
    }

    let mut header = vec![Span::styled(format!("{:>2}", cell.date.day()), day_style)];
    if let Some(tag) = cell.display_tag() {
        header.push(Span::raw(" "));
        header.push(Span::styled(tag.to_string(), tag_style(cell)));
    }

    let lunar_style = if cell.is_current_month {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut paragraph = Paragraph::new(vec![
        Line::from(header),
        Line::from(Span::styled(cell.lunar_label.clone(), lunar_style)),
    ]);

    if cell.is_today {
        paragraph = paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    }

    f.render_widget(paragraph, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled("■ 法定节假日", Style::default().fg(Color::Red)),
        Span::raw("  "),
        Span::styled("■ 调休补班", Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled("■ 今天", Style::default().fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(
            "←/→ 月 | ↑/↓ 年 | t 今天 | q 退出",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
}
