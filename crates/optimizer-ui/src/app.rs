//! Main application state and TUI event loop for the usage optimizer.
//!
//! [`App`] owns the theme, the dashboard session and the upload panel.  Key
//! handling is kept separate from terminal I/O so it can be driven directly
//! in tests.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use optimizer_runtime::session::DashboardSession;

use crate::dashboard_view;
use crate::themes::Theme;
use crate::upload::UploadPanel;

// ── Focus ─────────────────────────────────────────────────────────────────────

/// Which sidebar panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Upload,
    Regions,
}

impl Focus {
    fn toggled(self) -> Self {
        match self {
            Focus::Upload => Focus::Regions,
            Focus::Regions => Focus::Upload,
        }
    }
}

/// Leave raw mode and the alternate screen.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    pub session: DashboardSession,
    pub upload: UploadPanel,
    pub focus: Focus,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Regions get focus when the session already holds a dataset (a file
    /// given on the command line), otherwise the upload panel does.
    pub fn new(theme_name: &str, session: DashboardSession, upload: UploadPanel) -> Self {
        let focus = if session.is_ready() {
            Focus::Regions
        } else {
            Focus::Upload
        };
        Self {
            theme: Theme::from_name(theme_name),
            session,
            upload,
            focus,
            should_quit: false,
        }
    }

    /// Load `path` into the session, moving focus to the region list on
    /// success.
    pub fn load_path(&mut self, path: &Path) -> bool {
        let loaded = self.session.load_file(path);
        if loaded {
            self.focus = Focus::Regions;
        }
        loaded
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Blocks the calling thread inside `event::poll`; async callers should
    /// run it on a blocking task.  Returns the region selected at exit so
    /// the caller can remember it.
    pub fn run(mut self) -> io::Result<Option<String>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        restore_terminal()?;
        terminal.show_cursor()?;

        result.map(|()| self.session.selected_region().map(str::to_string))
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.upload.is_editing() {
            self.handle_path_entry(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggled(),
            KeyCode::Char('r') => self.upload.rescan(),
            KeyCode::Char('o') | KeyCode::Char('/') => {
                self.focus = Focus::Upload;
                self.upload.start_editing();
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
            KeyCode::Enter if self.focus == Focus::Upload => {
                if let Some(path) = self.upload.selected().map(Path::to_path_buf) {
                    self.load_path(&path);
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        dashboard_view::render_dashboard(
            frame,
            &self.session,
            &self.upload,
            self.focus,
            &self.theme,
        );
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn handle_path_entry(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some(path) = self.upload.submit_input() {
                    self.load_path(&path);
                }
            }
            KeyCode::Esc => self.upload.cancel_editing(),
            KeyCode::Backspace => self.upload.backspace(),
            KeyCode::Char(c) => self.upload.push_char(c),
            _ => {}
        }
    }

    fn move_cursor(&mut self, forward: bool) {
        match (self.focus, forward) {
            (Focus::Upload, true) => self.upload.next(),
            (Focus::Upload, false) => self.upload.previous(),
            (Focus::Regions, true) => {
                self.session.select_next_region();
            }
            (Focus::Regions, false) => {
                self.session.select_previous_region();
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use optimizer_runtime::session::SessionState;
    use ratatui::backend::TestBackend;
    use std::fs;
    use tempfile::TempDir;

    /// One day of hourly readings for Goa and Maharashtra, Maharashtra
    /// peaking at 18:00.
    fn usage_csv() -> String {
        let mut csv = String::from("Dates,States,Usage,latitude,longitude\n");
        for hour in 0..24 {
            let mh = if hour == 18 { 500.0 } else { 200.0 };
            csv.push_str(&format!(
                "02/01/2019 {hour:02}:00:00,Maharashtra,{mh},19.7,75.7\n"
            ));
            csv.push_str(&format!(
                "02/01/2019 {hour:02}:00:00,Goa,{},15.3,74.1\n",
                10.0 + hour as f64
            ));
        }
        csv
    }

    fn make_app() -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("long_data_.csv"), usage_csv()).unwrap();
        fs::write(dir.path().join("broken.csv"), "Dates,States\n02/01/2019,Goa\n").unwrap();
        let session = DashboardSession::new(vec!["Maharashtra".to_string()]);
        let upload = UploadPanel::new(dir.path());
        let app = App::new("dark", session, upload);
        (dir, app)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_app_creation_defaults() {
        let (_dir, app) = make_app();
        assert_eq!(app.focus, Focus::Upload);
        assert!(!app.should_quit);
        assert!(matches!(app.session.state(), SessionState::AwaitingFile));
        assert_eq!(app.upload.candidates().len(), 2);
    }

    #[test]
    fn test_app_focuses_regions_when_preloaded() {
        let (dir, _) = make_app();
        let mut session = DashboardSession::new(vec![]);
        assert!(session.load_file(&dir.path().join("long_data_.csv")));
        let app = App::new("light", session, UploadPanel::new(dir.path()));
        assert_eq!(app.focus, Focus::Regions);
    }

    #[test]
    fn test_quit_keys() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let (_dir, mut app) = make_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let (_dir, mut app) = make_app();
        app.handle_key(KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_tab_toggles_focus() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Regions);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Upload);
    }

    #[test]
    fn test_enter_loads_highlighted_file() {
        let (_dir, mut app) = make_app();
        // Candidates are sorted: broken.csv, long_data_.csv.
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert!(app.session.is_ready());
        assert_eq!(app.focus, Focus::Regions);
        assert_eq!(app.session.selected_region(), Some("Maharashtra"));
        assert_eq!(app.session.report().and_then(|r| r.peak).map(|p| p.hour), Some(18));
    }

    #[test]
    fn test_region_navigation_recomputes_report() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.session.selected_region(), Some("Goa"));
        let report = app.session.report().unwrap();
        assert_eq!(report.region, "Goa");
        assert_eq!(report.peak.map(|p| p.hour), Some(23));

        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.session.selected_region(), Some("Maharashtra"));
    }

    #[test]
    fn test_broken_file_shows_failure() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.session.state(), SessionState::Failed(_)));
        assert!(app.session.report().is_none());
        assert_eq!(app.focus, Focus::Upload);
    }

    #[test]
    fn test_path_entry_loads_typed_file() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Char('o'));
        assert!(app.upload.is_editing());

        // 'q' is text while typing a path.
        type_text(&mut app, "long_data_.csvq");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);

        assert!(!app.upload.is_editing());
        assert!(app.session.is_ready());
    }

    #[test]
    fn test_path_entry_missing_file_fails() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "missing.csv");
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.session.state(), SessionState::Failed(_)));
    }

    #[test]
    fn test_escape_cancels_path_entry() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Char('o'));
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Esc);
        assert!(!app.upload.is_editing());
        assert!(matches!(app.session.state(), SessionState::AwaitingFile));
    }

    #[test]
    fn test_rescan_picks_up_new_files() {
        let (dir, mut app) = make_app();
        fs::write(dir.path().join("extra.csv"), usage_csv()).unwrap();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.upload.candidates().len(), 3);
    }

    #[test]
    fn test_render_awaiting_screen() {
        let (_dir, app) = make_app();
        let text = screen(&app);
        assert!(text.contains("Awaiting for the dataset to be uploaded."));
        assert!(text.contains("Upload CSV"));
    }

    #[test]
    fn test_render_ready_screen() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        let text = screen(&app);
        assert!(text.contains("Dataset loaded and prepared successfully!"));
        assert!(text.contains("Consumption Analysis for Maharashtra"));
        assert!(text.contains("Daily Consumption Pattern"));
        assert!(text.contains("Average Hourly Consumption"));
        assert!(text.contains("Peak Usage Identified:"));
        assert!(!text.contains("Awaiting for the dataset"));
    }

    #[test]
    fn test_render_failed_screen() {
        let (_dir, mut app) = make_app();
        press(&mut app, KeyCode::Enter);
        let text = screen(&app);
        assert!(text.contains("An error occurred:"));
        assert!(text.contains("Please ensure you have uploaded"));
        assert!(!text.contains("Daily Consumption Pattern"));
    }
}
