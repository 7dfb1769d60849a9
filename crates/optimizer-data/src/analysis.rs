//! Per-region analysis pipeline.
//!
//! Filters a [`Dataset`] down to one region, runs the daily and hourly
//! aggregations and returns a [`RegionReport`] ready for the UI layer.

use chrono::NaiveDate;
use optimizer_core::models::{DailyTotal, Dataset, HourlyAverage, PeakHour};
use optimizer_core::{OptimizerError, Result};

use crate::aggregator::{date_range, UsageAggregator};

/// Everything the dashboard shows for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionReport {
    pub region: String,
    /// Number of readings for the region, missing values included.
    pub readings: usize,
    /// Sum of every non-missing reading.
    pub total_usage: f64,
    /// First and last calendar day with readings.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub daily: Vec<DailyTotal>,
    pub hourly: Vec<HourlyAverage>,
    /// `None` when every reading of the region is missing.
    pub peak: Option<PeakHour>,
}

/// Run the aggregations for `region`.
///
/// Only readings whose region matches exactly contribute; an unknown region
/// is an error rather than an empty report.
pub fn analyze_region(dataset: &Dataset, region: &str) -> Result<RegionReport> {
    let subset = dataset.for_region(region);
    if subset.is_empty() {
        return Err(OptimizerError::UnknownRegion(region.to_string()));
    }

    let daily = UsageAggregator::daily_totals(&subset);
    let hourly = UsageAggregator::hourly_averages(&subset);
    let peak = UsageAggregator::peak_hour(&hourly);

    tracing::debug!(
        region,
        readings = subset.len(),
        days = daily.len(),
        hours = hourly.len(),
        peak_hour = ?peak.map(|p| p.hour),
        "region analysed"
    );

    Ok(RegionReport {
        region: region.to_string(),
        readings: subset.len(),
        total_usage: UsageAggregator::total_usage(&subset),
        date_range: date_range(&daily),
        daily,
        hourly,
        peak,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use optimizer_core::models::UsageReading;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    /// Two regions, 24 hourly rows each on the 2nd of January.
    ///
    /// Punjab uses `100 + hour`, except hour 18 which uses 500.
    /// Goa uses `10 * hour`.
    fn two_region_fixture() -> Dataset {
        let mut readings = Vec::new();
        for hour in 0..24 {
            let punjab = if hour == 18 { 500.0 } else { 100.0 + hour as f64 };
            readings.push(UsageReading::new(ts(2, hour), "Punjab", Some(punjab)));
            readings.push(UsageReading::new(ts(2, hour), "Goa", Some(10.0 * hour as f64)));
        }
        Dataset::new(readings)
    }

    #[test]
    fn test_hourly_average_matches_hand_computed_means() {
        let ds = two_region_fixture();
        let report = analyze_region(&ds, "Goa").unwrap();

        assert_eq!(report.hourly.len(), 24);
        for h in &report.hourly {
            assert_eq!(h.mean, 10.0 * h.hour as f64, "hour {}", h.hour);
            assert_eq!(h.samples, 1);
        }
    }

    #[test]
    fn test_daily_total_single_day() {
        let ds = two_region_fixture();
        let report = analyze_region(&ds, "Goa").unwrap();

        // 10 * (0 + 1 + ... + 23) = 2760
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.daily[0].total, 2760.0);
        assert_eq!(report.total_usage, 2760.0);
    }

    #[test]
    fn test_peak_hour_eighteen() {
        let ds = two_region_fixture();
        let peak = analyze_region(&ds, "Punjab").unwrap().peak.unwrap();
        assert_eq!(peak.hour, 18);
        assert_eq!(peak.mean, 500.0);
    }

    #[test]
    fn test_no_leakage_between_regions() {
        let ds = two_region_fixture();
        let punjab = analyze_region(&ds, "Punjab").unwrap();
        let goa = analyze_region(&ds, "Goa").unwrap();

        assert_eq!(punjab.readings, 24);
        assert_eq!(goa.readings, 24);
        assert_ne!(punjab.daily, goa.daily);
        assert_ne!(punjab.hourly, goa.hourly);
        // Hour 0: Punjab 100, Goa 0.
        assert_eq!(punjab.hourly[0].mean, 100.0);
        assert_eq!(goa.hourly[0].mean, 0.0);
        assert_eq!(goa.peak.unwrap().hour, 23);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let ds = two_region_fixture();
        assert_eq!(
            analyze_region(&ds, "Punjab").unwrap(),
            analyze_region(&ds, "Punjab").unwrap()
        );
    }

    #[test]
    fn test_multi_day_hourly_mean() {
        let ds = Dataset::new(vec![
            UsageReading::new(ts(1, 8), "Kerala", Some(30.0)),
            UsageReading::new(ts(2, 8), "Kerala", Some(50.0)),
            UsageReading::new(ts(3, 8), "Kerala", Some(70.0)),
            UsageReading::new(ts(1, 9), "Kerala", Some(20.0)),
        ]);
        let report = analyze_region(&ds, "Kerala").unwrap();
        assert_eq!(report.hourly[0].mean, 50.0);
        assert_eq!(report.daily.len(), 3);
        assert_eq!(report.daily[0].total, 50.0);
        assert_eq!(
            report.date_range,
            Some((
                NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2019, 1, 3).unwrap()
            ))
        );
    }

    #[test]
    fn test_region_with_only_missing_values_has_no_peak() {
        let ds = Dataset::new(vec![UsageReading::new(ts(1, 8), "Sikkim", None)]);
        let report = analyze_region(&ds, "Sikkim").unwrap();
        assert!(report.hourly.is_empty());
        assert!(report.peak.is_none());
        assert_eq!(report.daily[0].total, 0.0);
    }

    #[test]
    fn test_unknown_region_is_error() {
        let ds = two_region_fixture();
        let err = analyze_region(&ds, "Atlantis").unwrap_err();
        assert!(matches!(err, OptimizerError::UnknownRegion(name) if name == "Atlantis"));
    }
}
