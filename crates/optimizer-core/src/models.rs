use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One prepared row of the usage CSV: the parsed timestamp, the region
/// (`States` column) and the usage value.
///
/// `usage` is `None` when the cell was empty or `NaN`; such readings are
/// skipped by sums and means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReading {
    pub timestamp: NaiveDateTime,
    pub region: String,
    pub usage: Option<f64>,
}

impl UsageReading {
    pub fn new(timestamp: NaiveDateTime, region: impl Into<String>, usage: Option<f64>) -> Self {
        Self {
            timestamp,
            region: region.into(),
            usage,
        }
    }

    /// Calendar day of the reading.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour of the day (0–23).
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}

/// All readings of one loaded file, ordered by timestamp.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    readings: Vec<UsageReading>,
}

impl Dataset {
    /// Build a dataset, stably sorting the readings by timestamp.
    pub fn new(mut readings: Vec<UsageReading>) -> Self {
        readings.sort_by_key(|r| r.timestamp);
        Self { readings }
    }

    pub fn readings(&self) -> &[UsageReading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Distinct region names in ascending order.
    pub fn regions(&self) -> Vec<String> {
        self.readings
            .iter()
            .map(|r| r.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Readings belonging to `region`, in timestamp order.
    pub fn for_region<'a>(&'a self, region: &str) -> Vec<&'a UsageReading> {
        self.readings.iter().filter(|r| r.region == region).collect()
    }
}

/// Sum of usage for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Mean usage for one hour of the day across every day in the subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyAverage {
    /// Hour of the day (0–23).
    pub hour: u32,
    pub mean: f64,
    /// Number of non-missing readings averaged.
    pub samples: usize,
}

/// The hour with the highest average usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakHour {
    pub hour: u32,
    pub mean: f64,
}
