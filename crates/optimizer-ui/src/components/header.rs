use crate::themes::Theme;
use ratatui::text::{Line, Span};

use super::truncate_start;

/// Lightning bolt placed before the application title.
pub const BOLT: &str = "⚡";

pub const TITLE: &str = "India Electricity Usage Optimizer";

pub const TAGLINE: &str = "An interactive tool to analyze and visualize state-wise electricity \
     consumption patterns in India. This project helps in identifying peak usage hours to \
     promote better energy management.";

/// Widest source path shown in the info line before it is shortened.
const MAX_SOURCE_WIDTH: usize = 48;

/// Dashboard header rendering four lines:
///
/// 1. Application title with the lightning bolt.
/// 2. A one-line tagline.
/// 3. A 60-column `=` separator.
/// 4. Loaded file and selected region in `[ file | region ]` format.
pub struct Header<'a> {
    /// Display name of the loaded file, `None` before the first load.
    pub source: Option<&'a str>,
    pub region: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: Option<&'a str>, region: Option<&'a str>, theme: &'a Theme) -> Self {
        Self {
            source,
            region,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);
        let source = self
            .source
            .map(|s| truncate_start(s, MAX_SOURCE_WIDTH))
            .unwrap_or_else(|| "no file".to_string());
        let region = self.region.unwrap_or("no region").to_string();

        vec![
            Line::from(vec![
                Span::styled(BOLT, self.theme.header_icon),
                Span::styled(format!(" {TITLE}"), self.theme.header),
            ]),
            Line::from(Span::styled(TAGLINE, self.theme.dim)),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(region, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::Theme;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        let lines = Header::new(None, None, &theme).to_lines();
        assert_eq!(lines.len(), 4, "header must produce exactly 4 lines");
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new(None, None, &theme).to_lines();
        let title = line_text(&lines[0]);
        assert_eq!(title, "⚡ India Electricity Usage Optimizer");
    }

    #[test]
    fn test_header_tagline_line() {
        let theme = Theme::dark();
        let lines = Header::new(None, None, &theme).to_lines();
        assert_eq!(
            line_text(&lines[1]),
            "An interactive tool to analyze and visualize state-wise electricity consumption \
             patterns in India. This project helps in identifying peak usage hours to promote \
             better energy management."
        );
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let lines = Header::new(None, None, &theme).to_lines();
        let sep = line_text(&lines[2]);
        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line_before_load() {
        let theme = Theme::dark();
        let lines = Header::new(None, None, &theme).to_lines();
        assert_eq!(line_text(&lines[3]), "[ no file | no region ]");
    }

    #[test]
    fn test_header_info_line_with_source_and_region() {
        let theme = Theme::dark();
        let lines = Header::new(Some("long_data_.csv"), Some("Maharashtra"), &theme).to_lines();
        assert_eq!(lines[3].spans.len(), 5);
        assert_eq!(line_text(&lines[3]), "[ long_data_.csv | Maharashtra ]");
    }

    #[test]
    fn test_header_long_source_is_shortened() {
        let theme = Theme::dark();
        let long = format!("/{}/long_data_.csv", "nested".repeat(20));
        let lines = Header::new(Some(&long), Some("Goa"), &theme).to_lines();
        let source = lines[3].spans[1].content.to_string();
        assert!(source.starts_with('…'));
        assert!(source.ends_with("long_data_.csv"));
    }
}
