//! Shared domain layer for the Electricity Usage Optimizer.
//!
//! Holds the usage-reading models, the error taxonomy, day-first date
//! parsing, number formatting and the command-line settings used by every
//! other crate in the workspace.

pub mod dates;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{OptimizerError, Result};
