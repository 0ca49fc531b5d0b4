//! Clean-lap predicates
//!
//! A clean lap is trustworthy evidence of pace: timed, accurate, and free of any
//! pit-lane transition. Race pace, degradation and consistency additionally reject
//! laps deleted by the stewards; stint summaries do not.

use crate::types::LapRecord;

/// Clean-lap rule for race pace, tire degradation and consistency.
pub fn is_clean_for_pace(lap: &LapRecord) -> bool {
    is_clean_for_stint(lap) && !lap.is_deleted
}

/// Clean-lap rule for stint summaries. Deleted laps still count.
pub fn is_clean_for_stint(lap: &LapRecord) -> bool {
    !lap.touches_pit_lane() && lap.is_accurate && lap.lap_time.is_some()
}
