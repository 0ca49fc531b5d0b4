//! Race pace: mean, median and fastest clean lap per driver

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::{DriverLaps, duration, filter, stats};
use crate::types::lap_time::timedelta_text;
use crate::{AnalysisConfig, Result};

/// Race pace of one driver over the whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct RacePaceRow {
    pub driver_code: String,
    pub driver_number: String,
    /// Mean clean lap time
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub average_lap_time: TimeDelta,
    /// Median clean lap time
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub median_lap_time: TimeDelta,
    /// Fastest clean lap time
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub fastest_lap_time: TimeDelta,
    /// Every lap the driver recorded, clean or not
    pub total_laps: usize,
    /// Laps that passed the pace filter
    pub clean_laps: usize,
}

/// Compute the race pace row for one driver; no row when the driver has no clean laps.
pub fn analyze_driver(driver: &DriverLaps<'_>, _config: &AnalysisConfig) -> Result<Vec<RacePaceRow>> {
    let clean: Vec<_> = driver.laps.iter().copied().filter(|lap| filter::is_clean_for_pace(lap)).collect();
    let Some(first) = clean.first() else {
        return Ok(Vec::new());
    };

    let seconds: Vec<f64> = clean.iter().filter_map(|lap| lap.lap_seconds()).collect();
    let (Some(average), Some(median), Some(fastest)) =
        (stats::mean(&seconds), stats::median(&seconds), stats::min(&seconds))
    else {
        return Ok(Vec::new());
    };

    Ok(vec![RacePaceRow {
        driver_code: first.driver_code.clone(),
        driver_number: first.driver_number.clone(),
        average_lap_time: duration(average)?,
        median_lap_time: duration(median)?,
        fastest_lap_time: duration(fastest)?,
        total_laps: driver.laps.len(),
        clean_laps: clean.len(),
    }])
}
