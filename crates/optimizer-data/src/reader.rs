//! CSV discovery and loading.
//!
//! Reads files with a `Dates`, `States` and `Usage` column (plus ignored
//! `latitude` / `longitude`) and converts every row into a [`UsageReading`].

use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use optimizer_core::dates::parse_day_first;
use optimizer_core::models::{Dataset, UsageReading};
use optimizer_core::{OptimizerError, Result};
use tracing::{debug, info, warn};

pub const DATES_COLUMN: &str = "Dates";
pub const REGION_COLUMN: &str = "States";
pub const USAGE_COLUMN: &str = "Usage";

/// How deep below the data directory CSV discovery descends.
const MAX_DISCOVERY_DEPTH: usize = 2;

// ── Public API ────────────────────────────────────────────────────────────────

/// Find `.csv` files under `dir` (at most two levels deep), sorted by path.
pub fn find_csv_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Data directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(MAX_DISCOVERY_DEPTH)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!("Found {} CSV files under {}", files.len(), dir.display());
    files
}

/// Load a usage CSV from disk.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    info!("Loading usage data from {}", path.display());
    let file = std::fs::File::open(path).map_err(|source| OptimizerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    load_dataset_from_reader(file)
}

/// Load a usage CSV from any byte source.
///
/// Fails on the first malformed row: a single unparseable date or usage
/// value rejects the whole file.
pub fn load_dataset_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut readings = Vec::new();
    for result in rdr.records() {
        let record = result?;
        readings.push(columns.reading(&record)?);
    }

    if readings.is_empty() {
        warn!("Usage file has a header but no rows");
        return Err(OptimizerError::EmptyDataset);
    }

    let dataset = Dataset::new(readings);
    info!(
        readings = dataset.len(),
        regions = dataset.regions().len(),
        "Usage data loaded"
    );
    Ok(dataset)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns in the header row.
struct ColumnIndex {
    dates: usize,
    region: usize,
    usage: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| OptimizerError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            dates: find(DATES_COLUMN)?,
            region: find(REGION_COLUMN)?,
            usage: find(USAGE_COLUMN)?,
        })
    }

    fn reading(&self, record: &StringRecord) -> Result<UsageReading> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        // Rows may stop early (trailing geo cells omitted) but never before
        // a required column.
        let cell = |idx: usize, column: &str| {
            record.get(idx).ok_or_else(|| OptimizerError::MissingField {
                line,
                column: column.to_string(),
            })
        };

        let raw_date = cell(self.dates, DATES_COLUMN)?;
        let timestamp = parse_day_first(raw_date).ok_or_else(|| OptimizerError::DateParse {
            line,
            value: raw_date.to_string(),
        })?;

        let region = cell(self.region, REGION_COLUMN)?;
        if region.is_empty() {
            return Err(OptimizerError::MissingRegion(line));
        }

        let usage = parse_usage(cell(self.usage, USAGE_COLUMN)?)
            .map_err(|value| OptimizerError::UsageParse { line, value })?;

        Ok(UsageReading::new(timestamp, region, usage))
    }
}

/// Empty and `NaN` cells are missing readings; anything else must be a
/// number.  On failure the offending text is returned.
fn parse_usage(raw: &str) -> std::result::Result<Option<f64>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(raw.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
