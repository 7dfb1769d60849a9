//! Dashboard session state machine.
//!
//! Every interaction (loading a file, changing the region) recomputes the
//! region report from scratch.  A failed load replaces whatever was shown
//! before so no stale or partial charts survive it.

use std::io::Read;
use std::path::Path;

use optimizer_core::models::Dataset;
use optimizer_core::OptimizerError;
use optimizer_data::analysis::{analyze_region, RegionReport};
use optimizer_data::reader::{load_dataset, load_dataset_from_reader};

use crate::selector::RegionSelector;

// ── Public types ──────────────────────────────────────────────────────────────

/// A successfully loaded file and the report for the selected region.
#[derive(Debug, Clone)]
pub struct LoadedDashboard {
    /// Display name of the file (usually its path).
    pub source: String,
    pub dataset: Dataset,
    pub selector: RegionSelector,
    pub report: RegionReport,
}

/// Why the most recent load failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum SessionState {
    /// Nothing has been loaded yet.
    AwaitingFile,
    Ready(Box<LoadedDashboard>),
    Failed(LoadFailure),
}

// ── DashboardSession ──────────────────────────────────────────────────────────

/// Owns the loaded dataset, the region selection and the derived report.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    /// Regions tried in order for the initial selection after each load.
    preferred_regions: Vec<String>,
    state: SessionState,
}

impl DashboardSession {
    pub fn new(preferred_regions: Vec<String>) -> Self {
        Self {
            preferred_regions,
            state: SessionState::AwaitingFile,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Report for the selected region, `None` unless a file is loaded.
    pub fn report(&self) -> Option<&RegionReport> {
        match &self.state {
            SessionState::Ready(loaded) => Some(&loaded.report),
            _ => None,
        }
    }

    pub fn selected_region(&self) -> Option<&str> {
        match &self.state {
            SessionState::Ready(loaded) => Some(loaded.selector.selected()),
            _ => None,
        }
    }

    pub fn regions(&self) -> &[String] {
        match &self.state {
            SessionState::Ready(loaded) => loaded.selector.regions(),
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Load a CSV from disk.  Returns `true` on success.
    pub fn load_file(&mut self, path: &Path) -> bool {
        let source = path.display().to_string();
        let result = load_dataset(path);
        self.install(source, result)
    }

    /// Load a CSV from an in-memory or streamed upload.  Returns `true` on
    /// success.
    pub fn load_from_reader<R: Read>(&mut self, source: &str, reader: R) -> bool {
        let result = load_dataset_from_reader(reader);
        self.install(source.to_string(), result)
    }

    // ── Region selection ──────────────────────────────────────────────────────

    pub fn select_next_region(&mut self) -> bool {
        self.change_region(|s| {
            s.next();
            true
        })
    }

    pub fn select_previous_region(&mut self) -> bool {
        self.change_region(|s| {
            s.previous();
            true
        })
    }

    /// Select `name` if it is one of the loaded regions.
    pub fn select_region(&mut self, name: &str) -> bool {
        self.change_region(|s| s.select(name))
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn install(&mut self, source: String, result: optimizer_core::Result<Dataset>) -> bool {
        let dataset = match result {
            Ok(dataset) => dataset,
            Err(e) => {
                self.fail(source, e);
                return false;
            }
        };

        let Some(selector) = RegionSelector::new(dataset.regions(), &self.preferred_regions)
        else {
            self.fail(source, OptimizerError::EmptyDataset);
            return false;
        };

        let result = analyze_region(&dataset, selector.selected());
        match result {
            Ok(report) => {
                tracing::info!(
                    source = %source,
                    region = selector.selected(),
                    regions = selector.regions().len(),
                    "dashboard ready"
                );
                self.state = SessionState::Ready(Box::new(LoadedDashboard {
                    source,
                    dataset,
                    selector,
                    report,
                }));
                true
            }
            Err(e) => {
                self.fail(source, e);
                false
            }
        }
    }

    /// Apply `update` to the selector and, if it reports a change, rebuild
    /// the report.
    fn change_region(&mut self, update: impl FnOnce(&mut RegionSelector) -> bool) -> bool {
        let SessionState::Ready(loaded) = &mut self.state else {
            return false;
        };
        if !update(&mut loaded.selector) {
            return false;
        }

        let result = analyze_region(&loaded.dataset, loaded.selector.selected());
        match result {
            Ok(report) => {
                tracing::debug!(region = %report.region, "region selected");
                loaded.report = report;
            }
            Err(e) => {
                let source = loaded.source.clone();
                self.fail(source, e);
            }
        }
        true
    }

    fn fail(&mut self, source: String, error: OptimizerError) {
        tracing::warn!(source = %source, error = %error, "failed to prepare dashboard");
        self.state = SessionState::Failed(LoadFailure {
            source,
            message: error.to_string(),
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
