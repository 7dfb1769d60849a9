//! Full-screen dashboard layout.
//!
//! The view is re-derived from the session on every frame:
//!
//! ```text
//! ┌ header (4 lines) ───────────────────────────────────────────┐
//! │ Upload CSV  │ ✔ success banner                              │
//! │             │ Consumption Analysis for {region}             │
//! │─────────────│ ┌ daily line chart ─┐ ┌ hourly bar chart ─┐   │
//! │ Region      │ └───────────────────┘ └───────────────────┘   │
//! │             │ ┌ Optimization Suggestions ────────────────┐  │
//! └ key help ───────────────────────────────────────────────────┘
//! ```
//!
//! Before the first load the main area holds the awaiting-file notice; after
//! a failed load it holds the error banner and hint, and no charts.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use optimizer_core::dates::hour_label;
use optimizer_core::formatting::{format_date_range, format_number, format_usage};
use optimizer_data::analysis::RegionReport;
use optimizer_runtime::session::{DashboardSession, LoadFailure, SessionState};

use crate::app::Focus;
use crate::charts;
use crate::components::banner::{Banner, BannerKind};
use crate::components::header::Header;
use crate::themes::Theme;
use crate::upload::UploadPanel;

pub const SUCCESS_MESSAGE: &str = "Dataset loaded and prepared successfully!";
pub const SUGGESTIONS_TITLE: &str = "Optimization Suggestions";
pub const PEAK_LEAD: &str = "Peak Usage Identified:";
pub const RECOMMENDATION_LEAD: &str = "Recommendation:";
pub const RECOMMENDATION: &str = "To improve energy efficiency and potentially reduce costs, \
     consider shifting high-power appliance usage away from this peak hour.";
pub const ERROR_HINT: &str = "Please ensure you have uploaded the correct 'long_data_.csv' file \
     and that it is not corrupted.";
pub const AWAITING_MESSAGE: &str = "Awaiting for the dataset to be uploaded.";

const SIDEBAR_WIDTH: u16 = 34;

/// `"In Goa, the highest average consumption occurs around 18:00."`
pub fn peak_message(region: &str, hour: u32) -> String {
    format!(
        "In {}, the highest average consumption occurs around {}.",
        region,
        hour_label(hour)
    )
}

pub fn error_message(message: &str) -> String {
    format!("An error occurred: {message}")
}

/// Render the whole dashboard into the frame.
pub fn render_dashboard(
    frame: &mut Frame,
    session: &DashboardSession,
    upload: &UploadPanel,
    focus: Focus,
    theme: &Theme,
) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let source = match session.state() {
        SessionState::Ready(loaded) => Some(loaded.source.as_str()),
        SessionState::Failed(failure) => Some(failure.source.as_str()),
        SessionState::AwaitingFile => None,
    };
    let header = Header::new(source, session.selected_region(), theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .areas(body_area);
    let [upload_area, regions_area] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Min(4)]).areas(sidebar_area);

    upload.render(frame, upload_area, focus == Focus::Upload, theme);

    let selected_index = match session.state() {
        SessionState::Ready(loaded) => Some(loaded.selector.index()),
        _ => None,
    };
    render_region_list(
        frame,
        regions_area,
        session.regions(),
        selected_index,
        focus == Focus::Regions,
        theme,
    );

    match session.state() {
        SessionState::AwaitingFile => render_awaiting_file(frame, main_area, theme),
        SessionState::Failed(failure) => render_load_failure(frame, main_area, failure, theme),
        SessionState::Ready(loaded) => render_report(frame, main_area, &loaded.report, theme),
    }

    render_key_help(frame, footer_area, upload.is_editing(), theme);
}

/// The region "dropdown": every distinct region with the selection marked.
pub fn render_region_list(
    frame: &mut Frame,
    area: Rect,
    regions: &[String],
    selected: Option<usize>,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style(focused))
        .title(Span::styled(" Select a State ", theme.bold));

    if regions.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Load a file first", theme.dim)).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = regions
        .iter()
        .map(|r| ListItem::new(Span::styled(r.as_str(), theme.list_item)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme.list_highlight)
        .highlight_symbol("▶ ");
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Charts and suggestions for one region.
pub fn render_report(frame: &mut Frame, area: Rect, report: &RegionReport, theme: &Theme) {
    let [banner_area, heading_area, charts_area, suggestions_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(8),
        Constraint::Length(6),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Banner::new(BannerKind::Success, SUCCESS_MESSAGE, theme).to_line()),
        banner_area,
    );

    let mut details = vec![Span::styled(
        format!("{} readings", format_number(report.readings as f64, 0)),
        theme.label,
    )];
    if let Some((first, last)) = report.date_range {
        details.push(Span::styled("  ·  ", theme.dim));
        details.push(Span::styled(format_date_range(first, last), theme.label));
    }
    details.push(Span::styled("  ·  total ", theme.dim));
    details.push(Span::styled(format_usage(report.total_usage), theme.value));

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Consumption Analysis for {}", report.region),
                theme.header,
            )),
            Line::from(details),
        ]),
        heading_area,
    );

    let [daily_area, hourly_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(charts_area);
    charts::render_daily_chart(frame, daily_area, &report.daily, theme);
    charts::render_hourly_chart(frame, hourly_area, &report.hourly, report.peak, theme);

    render_suggestions(frame, suggestions_area, report, theme);
}

pub fn render_suggestions(frame: &mut Frame, area: Rect, report: &RegionReport, theme: &Theme) {
    let mut lines = Vec::with_capacity(2);
    match report.peak {
        Some(peak) => {
            lines.push(
                Banner::new(
                    BannerKind::Info,
                    peak_message(&report.region, peak.hour),
                    theme,
                )
                .with_lead(PEAK_LEAD)
                .to_line(),
            );
            lines.push(
                Banner::new(BannerKind::Warning, RECOMMENDATION, theme)
                    .with_lead(RECOMMENDATION_LEAD)
                    .to_line(),
            );
        }
        None => lines.push(
            Banner::new(
                BannerKind::Info,
                format!("No usage values were recorded for {}.", report.region),
                theme,
            )
            .to_line(),
        ),
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.panel_border)
                    .title(Span::styled(format!(" {} ", SUGGESTIONS_TITLE), theme.bold)),
            ),
        area,
    );
}

/// Notice shown before any file has been loaded.
pub fn render_awaiting_file(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Banner::new(BannerKind::Info, AWAITING_MESSAGE, theme).to_line(),
        Line::from(""),
        Line::from(Span::styled(
            "Pick a CSV in the Upload panel and press Enter, or press 'o' to type a path.",
            theme.dim,
        )),
        Line::from(Span::styled(
            "Expected columns: Dates, States, Usage, latitude, longitude",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(theme.panel_border)),
        area,
    );
}

/// Error banner and hint after a failed load.  No charts are drawn.
pub fn render_load_failure(frame: &mut Frame, area: Rect, failure: &LoadFailure, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Banner::new(BannerKind::Error, error_message(&failure.message), theme).to_line(),
        Line::from(""),
        Banner::new(BannerKind::Warning, ERROR_HINT, theme).to_line(),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(theme.error)),
        area,
    );
}

fn render_key_help(frame: &mut Frame, area: Rect, editing: bool, theme: &Theme) {
    let help = if editing {
        "Enter load · Esc cancel · Backspace delete"
    } else {
        "Tab switch panel · ↑/↓ move · Enter load · o open path · r rescan · q quit"
    };
    frame.render_widget(Paragraph::new(Span::styled(help, theme.dim)), area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use optimizer_core::models::{DailyTotal, HourlyAverage, PeakHour};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_report(peak: Option<PeakHour>) -> RegionReport {
        let date = NaiveDate::from_ymd_opt(2019, 1, 2).unwrap();
        RegionReport {
            region: "Goa".to_string(),
            readings: 24,
            total_usage: 2_400.0,
            date_range: Some((date, date)),
            daily: vec![DailyTotal {
                date,
                total: 2_400.0,
            }],
            hourly: (0..24)
                .map(|hour| HourlyAverage {
                    hour,
                    mean: 100.0,
                    samples: 1,
                })
                .collect(),
            peak,
        }
    }

    fn draw<F: FnOnce(&mut Frame)>(width: u16, height: u16, f: F) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(f).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_peak_message_format() {
        assert_eq!(
            peak_message("Maharashtra", 18),
            "In Maharashtra, the highest average consumption occurs around 18:00."
        );
        assert_eq!(
            peak_message("Goa", 7),
            "In Goa, the highest average consumption occurs around 07:00."
        );
    }

    #[test]
    fn test_error_message_format() {
        assert_eq!(
            error_message("Missing required column 'Usage'"),
            "An error occurred: Missing required column 'Usage'"
        );
    }

    #[test]
    fn test_render_report_shows_heading_and_suggestions() {
        let theme = Theme::dark();
        let report = make_report(Some(PeakHour {
            hour: 0,
            mean: 100.0,
        }));
        let text = draw(140, 30, |frame| {
            let area = frame.area();
            render_report(frame, area, &report, &theme)
        });
        assert!(text.contains(SUCCESS_MESSAGE));
        assert!(text.contains("Consumption Analysis for Goa"));
        assert!(text.contains(SUGGESTIONS_TITLE));
        assert!(text.contains(PEAK_LEAD));
        assert!(text.contains(RECOMMENDATION_LEAD));
    }

    #[test]
    fn test_render_report_without_peak() {
        let theme = Theme::dark();
        let mut report = make_report(None);
        report.hourly.clear();
        let text = draw(140, 30, |frame| {
            let area = frame.area();
            render_report(frame, area, &report, &theme)
        });
        assert!(text.contains("No usage values were recorded for Goa."));
        assert!(!text.contains(PEAK_LEAD));
    }

    #[test]
    fn test_render_awaiting_file() {
        let theme = Theme::dark();
        let text = draw(100, 12, |frame| {
            let area = frame.area();
            render_awaiting_file(frame, area, &theme)
        });
        assert!(text.contains(AWAITING_MESSAGE));
    }

    #[test]
    fn test_render_load_failure() {
        let theme = Theme::dark();
        let failure = LoadFailure {
            source: "bad.csv".to_string(),
            message: "Invalid date 'yesterday' on line 2".to_string(),
        };
        let text = draw(140, 12, |frame| {
            let area = frame.area();
            render_load_failure(frame, area, &failure, &theme)
        });
        assert!(text.contains("An error occurred: Invalid date 'yesterday' on line 2"));
        assert!(text.contains("Please ensure you have uploaded"));
        assert!(!text.contains(charts::DAILY_TITLE));
    }

    #[test]
    fn test_render_region_list_empty_and_filled() {
        let theme = Theme::dark();
        let text = draw(30, 6, |frame| {
            let area = frame.area();
            render_region_list(frame, area, &[], None, false, &theme)
        });
        assert!(text.contains("Load a file first"));

        let regions = vec!["Goa".to_string(), "Maharashtra".to_string()];
        let text = draw(30, 6, |frame| {
            let area = frame.area();
            render_region_list(frame, area, &regions, Some(1), true, &theme)
        });
        assert!(text.contains("Goa"));
        assert!(text.contains("▶ Maharashtra"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let theme = Theme::classic();
        let report = make_report(None);
        draw(10, 5, |frame| {
            let area = frame.area();
            render_report(frame, area, &report, &theme)
        });
    }
}
