use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

/// Severity of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Warning,
    Error,
}

impl BannerKind {
    pub fn icon(self) -> &'static str {
        match self {
            BannerKind::Info => "ℹ",
            BannerKind::Success => "✔",
            BannerKind::Warning => "⚠",
            BannerKind::Error => "✖",
        }
    }

    pub fn style(self, theme: &Theme) -> Style {
        match self {
            BannerKind::Info => theme.info,
            BannerKind::Success => theme.success,
            BannerKind::Warning => theme.warning,
            BannerKind::Error => theme.error,
        }
    }
}

/// A coloured status message such as "Dataset loaded and prepared
/// successfully!".
///
/// An optional bold lead-in (`"Peak Usage Identified:"`) precedes the
/// message body.
pub struct Banner<'a> {
    pub kind: BannerKind,
    pub lead: Option<&'a str>,
    pub message: String,
    pub theme: &'a Theme,
}

impl<'a> Banner<'a> {
    pub fn new(kind: BannerKind, message: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            kind,
            lead: None,
            message: message.into(),
            theme,
        }
    }

    /// Prefix the message with an emphasised lead-in.
    pub fn with_lead(mut self, lead: &'a str) -> Self {
        self.lead = Some(lead);
        self
    }

    /// Format: `"ℹ Lead: message"`.
    pub fn to_line(&self) -> Line<'a> {
        let style = self.kind.style(self.theme);
        let mut spans = vec![Span::styled(format!("{} ", self.kind.icon()), style)];
        if let Some(lead) = self.lead {
            spans.push(Span::styled(
                format!("{lead} "),
                style.add_modifier(ratatui::style::Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(self.message.clone(), style));
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_banner_plain_line() {
        let theme = Theme::dark();
        let line = Banner::new(BannerKind::Success, "Loaded", &theme).to_line();
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line_text(&line), "✔ Loaded");
        assert_eq!(line.spans[1].style.fg, Some(Color::Green));
    }

    #[test]
    fn test_banner_with_lead_is_bold() {
        let theme = Theme::dark();
        let line = Banner::new(BannerKind::Info, "body", &theme)
            .with_lead("Lead:")
            .to_line();
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line_text(&line), "ℹ Lead: body");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_banner_kind_styles() {
        let theme = Theme::dark();
        assert_eq!(BannerKind::Info.style(&theme), theme.info);
        assert_eq!(BannerKind::Warning.style(&theme), theme.warning);
        assert_eq!(BannerKind::Error.style(&theme), theme.error);
    }
}
