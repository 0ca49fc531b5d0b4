//! Per-lap timing records

use chrono::TimeDelta;

use super::lap_time;

/// One timed (or untimed) lap of one driver, as delivered by the session provider.
///
/// Records are read-only to the analysis engine; every derived view is rebuilt from
/// them on each request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LapRecord {
    /// Short driver identifier, unique within a session (e.g. `VER`)
    pub driver_code: String,
    /// Driver number as published by the timing provider (e.g. `"1"`)
    pub driver_number: String,
    /// Constructor name
    pub team: Option<String>,
    /// 1-based lap number within the session for this driver
    pub lap_number: u32,
    /// Lap duration, `None` when the lap was not timed or its time could not be parsed
    pub lap_time: Option<TimeDelta>,
    /// Tire stint identifier
    pub stint_id: Option<u32>,
    /// Tire compound label
    pub compound: Option<String>,
    /// Lap ended with a pit entry
    pub pit_in_flag: bool,
    /// Lap started with a pit exit
    pub pit_out_flag: bool,
    /// Timing system trusts the lap time
    pub is_accurate: bool,
    /// Lap was invalidated by the stewards (e.g. track limits)
    pub is_deleted: bool,
}

impl LapRecord {
    /// Lap time in seconds, if timed.
    pub fn lap_seconds(&self) -> Option<f64> {
        self.lap_time.map(lap_time::to_seconds)
    }

    /// Whether the lap involved a pit-lane transition in either direction.
    pub fn touches_pit_lane(&self) -> bool {
        self.pit_in_flag || self.pit_out_flag
    }

    /// Whether `identifier` names this lap's driver, by code or by number.
    pub fn matches_driver(&self, identifier: &str) -> bool {
        self.driver_code == identifier || self.driver_number == identifier
    }
}
