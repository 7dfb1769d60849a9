//! Terminal UI layer for the electricity usage optimizer.
//!
//! Provides themes, the header and banner components, the daily and hourly
//! charts, the upload panel, the dashboard layout and the application event
//! loop built on top of [`ratatui`].

pub mod app;
pub mod charts;
pub mod components;
pub mod dashboard_view;
pub mod themes;
pub mod upload;

pub use optimizer_core as core;
