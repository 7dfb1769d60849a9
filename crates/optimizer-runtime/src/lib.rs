//! Runtime layer for the Electricity Usage Optimizer.
//!
//! Owns the dashboard session: which file is loaded, which region is
//! selected, and the report derived from both.

pub mod selector;
pub mod session;

pub use optimizer_core as core;
pub use optimizer_data as data;
