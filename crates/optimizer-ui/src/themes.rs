use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  Absent or
/// unparseable values are treated as dark.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(background_from_colorfgbg)
        .unwrap_or(BackgroundType::Dark)
}

fn background_from_colorfgbg(value: &str) -> Option<BackgroundType> {
    let bg: u8 = value.split(';').next_back()?.parse().ok()?;
    Some(if bg <= 6 {
        BackgroundType::Dark
    } else {
        BackgroundType::Light
    })
}

/// Every style used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_icon: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Banners ──────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub panel_border: Style,
    /// Border of the panel that currently receives key presses.
    pub panel_focused: Style,
    pub list_item: Style,
    pub list_highlight: Style,
    /// Free-text path entry in the upload panel.
    pub input: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub axis: Style,
    /// Daily totals line.
    pub daily_line: Style,
    /// Ordinary hourly-average bars.
    pub hourly_bar: Style,
    /// The bar of the peak hour.
    pub peak_bar: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            header_icon: Style::default().fg(Color::LightYellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            panel_border: Style::default().fg(Color::DarkGray),
            panel_focused: Style::default().fg(Color::Cyan),
            list_item: Style::default().fg(Color::Gray),
            list_highlight: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            input: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),

            axis: Style::default().fg(Color::Gray),
            daily_line: Style::default().fg(Color::LightBlue),
            hourly_bar: Style::default().fg(Color::LightRed),
            peak_bar: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text with saturated accents so charts stay legible on a white
    /// canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_icon: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            panel_border: Style::default().fg(Color::Gray),
            panel_focused: Style::default().fg(Color::Blue),
            list_item: Style::default().fg(Color::DarkGray),
            list_highlight: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            input: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::UNDERLINED),

            axis: Style::default().fg(Color::DarkGray),
            daily_line: Style::default().fg(Color::Blue),
            hourly_bar: Style::default().fg(Color::Red),
            peak_bar: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette and no bold
    /// modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Yellow),
            header_icon: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            panel_border: Style::default().fg(Color::DarkGray),
            panel_focused: Style::default().fg(Color::White),
            list_item: Style::default().fg(Color::Gray),
            list_highlight: Style::default().fg(Color::Black).bg(Color::White),
            input: Style::default().fg(Color::White),

            axis: Style::default().fg(Color::Gray),
            daily_line: Style::default().fg(Color::Blue),
            hourly_bar: Style::default().fg(Color::Red),
            peak_bar: Style::default().fg(Color::Yellow),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name.  Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Border style for a panel depending on keyboard focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.panel_focused
        } else {
            self.panel_border
        }
    }

    /// Bar style for an hour, highlighting the peak.
    pub fn bar_style(&self, is_peak: bool) -> Style {
        if is_peak {
            self.peak_bar
        } else {
            self.hourly_bar
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
