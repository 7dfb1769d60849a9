//! The "upload" panel: CSV files discovered under the data directory plus a
//! free-text path entry for anything else.

use std::path::{Path, PathBuf};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use optimizer_data::reader::find_csv_files;

use crate::components::truncate_start;
use crate::themes::Theme;

#[derive(Debug, Clone)]
pub struct UploadPanel {
    data_dir: PathBuf,
    candidates: Vec<PathBuf>,
    cursor: usize,
    /// `Some` while the user is typing a path.
    input: Option<String>,
}

impl UploadPanel {
    /// Create the panel and scan `data_dir` for CSV files.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let mut panel = Self {
            data_dir: data_dir.into(),
            candidates: Vec::new(),
            cursor: 0,
            input: None,
        };
        panel.rescan();
        panel
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Re-read the data directory, keeping the highlighted file when it is
    /// still present.
    pub fn rescan(&mut self) {
        let previous = self.selected().map(Path::to_path_buf);
        self.candidates = find_csv_files(&self.data_dir);
        self.cursor = previous
            .and_then(|p| self.candidates.iter().position(|c| *c == p))
            .unwrap_or(0);
        tracing::debug!(
            dir = %self.data_dir.display(),
            files = self.candidates.len(),
            "scanned for CSV files"
        );
    }

    pub fn selected(&self) -> Option<&Path> {
        self.candidates.get(self.cursor).map(PathBuf::as_path)
    }

    pub fn next(&mut self) {
        if !self.candidates.is_empty() {
            self.cursor = (self.cursor + 1) % self.candidates.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.candidates.is_empty() {
            self.cursor = self
                .cursor
                .checked_sub(1)
                .unwrap_or(self.candidates.len() - 1);
        }
    }

    // ── Path entry ───────────────────────────────────────────────────────────

    pub fn is_editing(&self) -> bool {
        self.input.is_some()
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn start_editing(&mut self) {
        self.input = Some(String::new());
    }

    pub fn cancel_editing(&mut self) {
        self.input = None;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(input) = self.input.as_mut() {
            input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.input.as_mut() {
            input.pop();
        }
    }

    /// Finish path entry.  Relative paths resolve against the data directory;
    /// blank input yields `None`.
    pub fn submit_input(&mut self) -> Option<PathBuf> {
        let raw = self.input.take()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let path = PathBuf::from(trimmed);
        Some(if path.is_absolute() {
            path
        } else {
            self.data_dir.join(path)
        })
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Display name of a candidate: its path relative to the data directory.
    fn display_name(&self, path: &Path) -> String {
        path.strip_prefix(&self.data_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused))
            .title(Span::styled(" Upload CSV ", theme.bold));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [list_area, input_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let width = list_area.width.saturating_sub(2) as usize;
        if self.candidates.is_empty() {
            let dir = truncate_start(&self.data_dir().display().to_string(), width);
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled("No CSV files in", theme.dim)),
                    Line::from(Span::styled(dir, theme.dim)),
                ]),
                list_area,
            );
        } else {
            let items: Vec<ListItem> = self
                .candidates
                .iter()
                .map(|p| {
                    ListItem::new(Span::styled(
                        truncate_start(&self.display_name(p), width),
                        theme.list_item,
                    ))
                })
                .collect();
            let list = List::new(items)
                .highlight_style(theme.list_highlight)
                .highlight_symbol("▶ ");
            let mut state = ListState::default().with_selected(Some(self.cursor));
            frame.render_stateful_widget(list, list_area, &mut state);
        }

        let input_line = match self.input() {
            Some(text) => {
                let shown = truncate_start(text, (input_area.width as usize).saturating_sub(3));
                Line::from(vec![
                    Span::styled("> ", theme.label),
                    Span::styled(shown, theme.input),
                    Span::styled("█", theme.input),
                ])
            }
            None => Line::from(Span::styled("o: open a path", theme.dim)),
        };
        frame.render_widget(Paragraph::new(input_line), input_area);
    }
}
