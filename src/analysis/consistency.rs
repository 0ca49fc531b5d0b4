//! Consistency: spread of clean lap times per driver

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{DriverLaps, duration, filter, stats};
use crate::types::lap_time::timedelta_text;
use crate::{AnalysisConfig, Result};

/// Lap time spread of one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ConsistencyRow {
    pub driver_code: String,
    pub driver_number: String,
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub average_lap_time: TimeDelta,
    /// Sample standard deviation in seconds
    pub std_deviation: f64,
    /// Standard deviation as a percentage of the mean; lower is more consistent
    pub coefficient_of_variation: Option<f64>,
    /// Clean laps analyzed
    pub total_laps: usize,
}

/// One row per driver with at least `config.min_consistency_laps` clean laps.
pub fn analyze_driver(driver: &DriverLaps<'_>, config: &AnalysisConfig) -> Result<Vec<ConsistencyRow>> {
    let clean: Vec<_> = driver.laps.iter().copied().filter(|lap| filter::is_clean_for_pace(lap)).collect();
    if clean.len() < config.min_consistency_laps {
        return Ok(Vec::new());
    }
    let Some(first) = clean.first() else {
        return Ok(Vec::new());
    };

    let seconds: Vec<f64> = clean.iter().filter_map(|lap| lap.lap_seconds()).collect();
    let (Some(average), Some(std_deviation)) = (stats::mean(&seconds), stats::sample_std_dev(&seconds)) else {
        return Ok(Vec::new());
    };
    let coefficient_of_variation = (average > 0.0).then(|| std_deviation / average * 100.0);

    Ok(vec![ConsistencyRow {
        driver_code: first.driver_code.clone(),
        driver_number: first.driver_number.clone(),
        average_lap_time: duration(average)?,
        std_deviation,
        coefficient_of_variation,
        total_laps: clean.len(),
    }])
}

/// Sort most consistent first; rows without a coefficient of variation go last.
///
/// The sort is stable, so rows that compare equal keep their relative order.
pub fn rank(rows: &mut [ConsistencyRow]) {
    rows.sort_by(|a, b| compare_cv(a.coefficient_of_variation, b.coefficient_of_variation));
}

fn compare_cv(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LapBuilder, driver_laps};
    use proptest::prelude::*;

    fn row(code: &str, cv: Option<f64>) -> ConsistencyRow {
        ConsistencyRow {
            driver_code: code.to_string(),
            driver_number: "0".to_string(),
            average_lap_time: TimeDelta::seconds(90),
            std_deviation: 0.2,
            coefficient_of_variation: cv,
            total_laps: 10,
        }
    }

    #[test]
    fn three_laps_produce_spread() {
        let laps = vec![
            LapBuilder::new("A", 1).time(90.0).build(),
            LapBuilder::new("A", 2).time(91.0).build(),
            LapBuilder::new("A", 3).time(92.0).build(),
        ];
        let rows = analyze_driver(&driver_laps(&laps), &AnalysisConfig::default()).unwrap();

        assert_eq!(rows.len(), 1);
        assert!((rows[0].std_deviation - 1.0).abs() < 1e-9);
        let cv = rows[0].coefficient_of_variation.unwrap();
        assert!((cv - 100.0 / 91.0).abs() < 1e-9);
        assert_eq!(rows[0].average_lap_time, TimeDelta::seconds(91));
        assert_eq!(rows[0].total_laps, 3);
    }

    #[test]
    fn two_clean_laps_are_not_enough() {
        let laps = vec![
            LapBuilder::new("C", 1).time(90.0).build(),
            LapBuilder::new("C", 2).time(90.4).build(),
            LapBuilder::new("C", 3).time(89.0).deleted().build(),
        ];
        assert!(analyze_driver(&driver_laps(&laps), &AnalysisConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn identical_laps_have_zero_cv() {
        let laps: Vec<_> = (1..=4).map(|n| LapBuilder::new("Z", n).time(75.0).build()).collect();
        let rows = analyze_driver(&driver_laps(&laps), &AnalysisConfig::default()).unwrap();
        assert_eq!(rows[0].coefficient_of_variation, Some(0.0));
    }

    #[test]
    fn non_positive_mean_has_no_cv() {
        let laps: Vec<_> = [-1.0, 0.0, 1.0]
            .iter()
            .zip(1..)
            .map(|(&t, n)| LapBuilder::new("N", n).time(t).build())
            .collect();
        let rows = analyze_driver(&driver_laps(&laps), &AnalysisConfig::default()).unwrap();
        assert_eq!(rows[0].coefficient_of_variation, None);
    }

    #[test]
    fn rank_puts_missing_cv_last() {
        let mut rows = vec![row("X", None), row("B", Some(0.9)), row("Y", None), row("A", Some(0.3))];
        rank(&mut rows);
        let codes: Vec<&str> = rows.iter().map(|r| r.driver_code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B", "X", "Y"]);
    }

    proptest! {
        #[test]
        fn ranking_is_idempotent_and_nulls_trail(
            cvs in prop::collection::vec(prop::option::of(0.0f64..5.0), 0..20)
        ) {
            let mut rows: Vec<ConsistencyRow> =
                cvs.iter().enumerate().map(|(i, cv)| row(&format!("D{i}"), *cv)).collect();
            rank(&mut rows);
            let once = rows.clone();
            rank(&mut rows);
            prop_assert_eq!(&rows, &once);

            let first_null = rows.iter().position(|r| r.coefficient_of_variation.is_none());
            if let Some(idx) = first_null {
                prop_assert!(rows[idx..].iter().all(|r| r.coefficient_of_variation.is_none()));
            }
            for pair in rows.windows(2) {
                if let (Some(a), Some(b)) = (pair[0].coefficient_of_variation, pair[1].coefficient_of_variation) {
                    prop_assert!(a <= b);
                }
            }
        }
    }
}
