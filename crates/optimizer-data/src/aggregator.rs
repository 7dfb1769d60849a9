//! Daily and hourly aggregation of one region's readings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use optimizer_core::models::{DailyTotal, HourlyAverage, PeakHour, UsageReading};

// ── Accumulators ──────────────────────────────────────────────────────────────

/// Running sum and count of non-missing usage values.
#[derive(Debug, Clone, Copy, Default)]
struct UsageStats {
    sum: f64,
    count: usize,
}

impl UsageStats {
    fn add(&mut self, usage: Option<f64>) {
        if let Some(v) = usage {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

// ── UsageAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups readings by calendar day and by hour.
pub struct UsageAggregator;

impl UsageAggregator {
    /// Sum of usage per calendar day, ascending by date.
    ///
    /// Only days with at least one reading appear.  A day whose readings are
    /// all missing totals `0.0`.
    pub fn daily_totals(readings: &[&UsageReading]) -> Vec<DailyTotal> {
        Self::group_by(readings, |r| r.day())
            .into_iter()
            .map(|(date, stats)| DailyTotal {
                date,
                total: stats.sum,
            })
            .collect()
    }

    /// Mean usage per hour of day across every day, ascending by hour.
    ///
    /// Hours without a single non-missing reading are absent.
    pub fn hourly_averages(readings: &[&UsageReading]) -> Vec<HourlyAverage> {
        Self::group_by(readings, |r| r.hour())
            .into_iter()
            .filter_map(|(hour, stats)| {
                stats.mean().map(|mean| HourlyAverage {
                    hour,
                    mean,
                    samples: stats.count,
                })
            })
            .collect()
    }

    /// The hour with the highest mean.  Ties go to the smallest hour and
    /// `NaN` means (opposite infinities in one hour) never win.
    pub fn peak_hour(hourly: &[HourlyAverage]) -> Option<PeakHour> {
        let mut by_hour: Vec<&HourlyAverage> =
            hourly.iter().filter(|h| !h.mean.is_nan()).collect();
        by_hour.sort_by_key(|h| h.hour);

        by_hour
            .into_iter()
            .fold(None, |best: Option<PeakHour>, h| match best {
                Some(b) if b.mean >= h.mean => Some(b),
                _ => Some(PeakHour {
                    hour: h.hour,
                    mean: h.mean,
                }),
            })
    }

    /// Total of every non-missing reading.
    pub fn total_usage(readings: &[&UsageReading]) -> f64 {
        readings.iter().filter_map(|r| r.usage).sum()
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn group_by<K: Ord>(
        readings: &[&UsageReading],
        key_fn: impl Fn(&UsageReading) -> K,
    ) -> BTreeMap<K, UsageStats> {
        let mut map: BTreeMap<K, UsageStats> = BTreeMap::new();
        for &reading in readings {
            map.entry(key_fn(reading)).or_default().add(reading.usage);
        }
        map
    }
}

/// First and last day covered by a daily series.
pub fn date_range(daily: &[DailyTotal]) -> Option<(NaiveDate, NaiveDate)> {
    Some((daily.first()?.date, daily.last()?.date))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
