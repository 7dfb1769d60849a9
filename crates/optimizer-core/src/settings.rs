use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Region selected when neither `--region` nor a saved region applies.
pub const DEFAULT_REGION: &str = "Maharashtra";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analyse regional electricity consumption and find peak usage hours
#[derive(Parser, Debug, Clone)]
#[command(
    name = "usage-optimizer",
    about = "Analyse regional electricity consumption and find peak usage hours",
    version
)]
pub struct Settings {
    /// CSV file with usage readings to open at startup
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Directory scanned for CSV files offered in the upload panel
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Region to select after loading a file
    #[arg(long)]
    pub region: Option<String>,

    /// Region preferred when no explicit or saved region is available
    #[arg(long, default_value = DEFAULT_REGION)]
    pub default_region: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Log file path (defaults to ~/.usage-optimizer/logs/usage-optimizer.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved preferences
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Preferences saved to `~/.usage-optimizer/last_used.json`.
///
/// Only display preferences are kept here, never the usage data itself.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl LastUsedParams {
    /// Default location of the preferences file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Preferences path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".usage-optimizer").join("last_used.json")
    }

    /// Load from `path`, returning `Default` when the file is absent or
    /// cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
            Self::default()
        })
    }

    /// Atomically write to `path`, creating parent directories if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the preferences file at `path` if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Record the region that was on screen when the dashboard closed.
    pub fn remember_region(path: &Path, region: &str) -> Result<(), std::io::Error> {
        let mut params = Self::load_from(path);
        params.region = Some(region.to_string());
        params.save_to(path)
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and merge saved preferences.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Parse `args`, fill values not given on the command line from the
    /// preferences at `config_path`, then persist the merged result.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!(error = %e, "could not clear saved preferences");
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // Command-line values always win over saved ones.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "data_dir") {
            if let Some(v) = last.data_dir {
                settings.data_dir = v;
            }
        }
        if settings.region.is_none() {
            settings.region = last.region;
        }

        settings = settings.apply_debug();

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!(error = %e, "could not save preferences");
        }

        settings
    }

    /// Regions to try, in order, when choosing the initial selection.
    pub fn preferred_regions(&self) -> Vec<String> {
        let mut preferred: Vec<String> = self.region.iter().cloned().collect();
        if !preferred.contains(&self.default_region) {
            preferred.push(self.default_region.clone());
        }
        preferred
    }

    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "debug".to_string();
        }
        self
    }
}

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            data_dir: Some(s.data_dir.clone()),
            region: s.region.clone(),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
///
/// clap stores the arg id under the field name (underscores), not the long
/// flag spelling.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
