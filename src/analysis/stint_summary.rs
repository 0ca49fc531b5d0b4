//! Stint summaries: length, average and fastest lap per stint

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{DriverLaps, duration, filter, stats, stint};
use crate::types::lap_time::timedelta_text;
use crate::{AnalysisConfig, Result};

/// Summary of one stint of one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct StintSummaryRow {
    pub driver_code: String,
    pub driver_number: String,
    pub stint: u32,
    pub compound: Option<String>,
    /// Laps that passed the stint filter
    pub stint_length: usize,
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub average_lap_time: TimeDelta,
    #[serde(with = "timedelta_text")]
    #[cfg_attr(feature = "tauri", specta(type = String))]
    pub fastest_lap_time: TimeDelta,
}

/// One row per stint with at least one lap passing the stint filter.
///
/// Unlike degradation there is no minimum stint length, and deleted laps are kept.
pub fn analyze_driver(driver: &DriverLaps<'_>, _config: &AnalysisConfig) -> Result<Vec<StintSummaryRow>> {
    let mut rows = Vec::new();

    for stint in stint::group_by_stint(&driver.laps) {
        let clean = stint.clean_laps(filter::is_clean_for_stint);
        let Some(first) = clean.first() else {
            trace!(driver = driver.code, stint = stint.id, "Stint has no clean laps");
            continue;
        };

        let seconds: Vec<f64> = clean.iter().filter_map(|lap| lap.lap_seconds()).collect();
        let (Some(average), Some(fastest)) = (stats::mean(&seconds), stats::min(&seconds)) else {
            continue;
        };

        rows.push(StintSummaryRow {
            driver_code: first.driver_code.clone(),
            driver_number: first.driver_number.clone(),
            stint: stint.id,
            compound: first.compound.clone(),
            stint_length: clean.len(),
            average_lap_time: duration(average)?,
            fastest_lap_time: duration(fastest)?,
        });
    }

    Ok(rows)
}
