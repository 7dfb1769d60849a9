//! Data layer for the Electricity Usage Optimizer.
//!
//! Responsible for discovering and loading usage CSV files, grouping the
//! readings of one region into daily totals and hourly averages, and running
//! the per-region analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use optimizer_core as core;
