use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the usage optimizer.
#[derive(Error, Debug)]
pub enum OptimizerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed CSV.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A column the loader depends on is absent from the header row.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A `Dates` cell did not match any recognised day-first layout.
    #[error("Invalid date '{value}' on line {line}")]
    DateParse { line: u64, value: String },

    /// A `Usage` cell is neither empty nor a number.
    #[error("Invalid usage value '{value}' on line {line}")]
    UsageParse { line: u64, value: String },

    /// A row ends before one of the required columns.
    #[error("Missing '{column}' value on line {line}")]
    MissingField { line: u64, column: String },

    /// A `States` cell is empty.
    #[error("Missing region name on line {0}")]
    MissingRegion(u64),

    /// The file has a header but no data rows.
    #[error("The dataset contains no readings")]
    EmptyDataset,

    /// A region was requested that is not present in the loaded data.
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// Convenience alias used throughout the optimizer crates.
pub type Result<T> = std::result::Result<T, OptimizerError>;
