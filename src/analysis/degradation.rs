//! Tire degradation: first-to-last clean lap delta per stint

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{DriverLaps, duration, filter, stats, stint};
use crate::types::lap_time::timedelta_text;
use crate::{AnalysisConfig, AnalysisError, Result};

/// Degradation over one stint of one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DegradationRow {
    pub driver_code: String,
    pub driver_number: String,
    /// Stint number
    pub stint: u32,
    /// Tire compound of the first clean lap
    pub compound: Option<String>,
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub first_lap_time: TimeDelta,
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub last_lap_time: TimeDelta,
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub average_lap_time: TimeDelta,
    /// Last clean lap minus first clean lap; negative when the car got faster
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub degradation: TimeDelta,
    /// Clean laps in the stint
    pub stint_length: usize,
}

/// One row per stint with at least `config.min_degradation_laps` clean laps.
pub fn analyze_driver(driver: &DriverLaps<'_>, config: &AnalysisConfig) -> Result<Vec<DegradationRow>> {
    let mut rows = Vec::new();

    for stint in stint::group_by_stint(&driver.laps) {
        let clean = stint.clean_laps(filter::is_clean_for_pace);
        if clean.len() < config.min_degradation_laps {
            trace!(driver = driver.code, stint = stint.id, clean_laps = clean.len(), "Stint too short for degradation");
            continue;
        }

        let (Some(first), Some(last)) = (clean.first(), clean.last()) else {
            continue;
        };
        let (Some(first_time), Some(last_time)) = (first.lap_time, last.lap_time) else {
            continue;
        };

        let seconds: Vec<f64> = clean.iter().filter_map(|lap| lap.lap_seconds()).collect();
        let Some(average) = stats::mean(&seconds) else {
            continue;
        };

        let degradation = last_time.checked_sub(&first_time).ok_or_else(|| {
            AnalysisError::time_conversion(format!("stint {} lap time delta overflows", stint.id))
        })?;

        rows.push(DegradationRow {
            driver_code: first.driver_code.clone(),
            driver_number: first.driver_number.clone(),
            stint: stint.id,
            compound: first.compound.clone(),
            first_lap_time: first_time,
            last_lap_time: last_time,
            average_lap_time: duration(average)?,
            degradation,
            stint_length: clean.len(),
        });
    }

    Ok(rows)
}
