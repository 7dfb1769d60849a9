//! The two consumption charts of the dashboard.
//!
//! * Daily totals as a line chart over calendar days.
//! * Average hourly profile as a 24-slot bar chart with the peak bar
//!   highlighted.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Modifier,
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use optimizer_core::formatting::format_compact;
use optimizer_core::models::{DailyTotal, HourlyAverage, PeakHour};

use crate::themes::Theme;

pub const DAILY_TITLE: &str = "Daily Consumption Pattern";
pub const DAILY_X_TITLE: &str = "Date";
pub const DAILY_Y_TITLE: &str = "Total Consumption (MW)";

pub const HOURLY_TITLE: &str = "Average Hourly Consumption";
pub const HOURLY_X_TITLE: &str = "Hour of Day";
pub const HOURLY_Y_TITLE: &str = "Average Consumption (MW)";

/// Bar heights are integers; means are stored with one decimal of precision.
const BAR_SCALE: f64 = 10.0;

// ── Daily line chart ─────────────────────────────────────────────────────────

/// Chart points: x is the number of days since the first day, y the total.
///
/// Using day offsets rather than indices keeps gaps between days visible.
pub fn daily_points(daily: &[DailyTotal]) -> Vec<(f64, f64)> {
    let Some(first) = daily.first().map(|d| d.date) else {
        return Vec::new();
    };
    daily
        .iter()
        .map(|d| ((d.date - first).num_days() as f64, d.total))
        .collect()
}

/// Y-axis bounds covering every value, always including zero and never
/// collapsing to an empty range.
pub fn value_bounds<I>(values: I) -> [f64; 2]
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = max - min;
    if span <= 0.0 {
        return [min, min + 1.0];
    }
    [min, max + span * 0.05]
}

/// Three evenly spaced labels (low, middle, high) for a numeric axis.
pub fn value_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        format_compact(bounds[0]),
        format_compact(mid),
        format_compact(bounds[1]),
    ]
}

/// First, middle and last day labels for the date axis.
pub fn date_labels(daily: &[DailyTotal]) -> Vec<String> {
    let fmt = |d: NaiveDate| d.format("%d %b").to_string();
    match daily {
        [] => Vec::new(),
        [only] => vec![fmt(only.date)],
        [first, .., last] => {
            let mid = first.date + (last.date - first.date) / 2;
            vec![fmt(first.date), fmt(mid), fmt(last.date)]
        }
    }
}

pub fn render_daily_chart(frame: &mut Frame, area: Rect, daily: &[DailyTotal], theme: &Theme) {
    let points = daily_points(daily);
    let x_max = points.last().map(|p| p.0).unwrap_or(0.0).max(1.0);
    let y_bounds = value_bounds(daily.iter().map(|d| d.total));

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.daily_line)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border)
                .title(Span::styled(format!(" {} ", DAILY_TITLE), theme.bold)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(DAILY_X_TITLE, theme.label))
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(date_labels(daily)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(DAILY_Y_TITLE, theme.label))
                .style(theme.axis)
                .bounds(y_bounds)
                .labels(value_labels(y_bounds)),
        )
        .style(theme.text);

    frame.render_widget(chart, area);
}

// ── Hourly bar chart ─────────────────────────────────────────────────────────

/// Integer bar height for an hourly mean; negative means are drawn empty.
pub fn bar_height(mean: f64) -> u64 {
    if mean.is_finite() && mean > 0.0 {
        (mean * BAR_SCALE).round() as u64
    } else {
        0
    }
}

/// Widest bar that lets `bars` bars plus one-column gaps fit in `width`
/// columns (borders included).
pub fn bar_width(width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let inner = width.saturating_sub(2) as usize;
    let per_bar = (inner + 1) / bars;
    per_bar.saturating_sub(1).max(1) as u16
}

fn hourly_bars<'a>(
    hourly: &[HourlyAverage],
    peak: Option<PeakHour>,
    theme: &Theme,
) -> Vec<Bar<'a>> {
    hourly
        .iter()
        .map(|h| {
            let is_peak = peak.is_some_and(|p| p.hour == h.hour);
            let style = theme.bar_style(is_peak);
            Bar::default()
                .value(bar_height(h.mean))
                .label(Line::from(format!("{:02}", h.hour)))
                .text_value(format_compact(h.mean))
                .style(style)
                .value_style(style.add_modifier(Modifier::REVERSED))
        })
        .collect()
}

pub fn render_hourly_chart(
    frame: &mut Frame,
    area: Rect,
    hourly: &[HourlyAverage],
    peak: Option<PeakHour>,
    theme: &Theme,
) {
    let bars = hourly_bars(hourly, peak, theme);
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border)
                .title(Span::styled(format!(" {} ", HOURLY_TITLE), theme.bold))
                .title_bottom(Line::from(vec![
                    Span::styled(format!(" x: {HOURLY_X_TITLE}"), theme.label),
                    Span::styled("  ·  ", theme.dim),
                    Span::styled(format!("y: {HOURLY_Y_TITLE} "), theme.label),
                ])),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area.width, hourly.len()))
        .bar_gap(1)
        .label_style(theme.axis)
        .style(theme.text);

    frame.render_widget(chart, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
