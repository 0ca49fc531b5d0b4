//! Test utilities for building lap data and locating session fixtures
//!
//! Shared by unit tests and the benchmarks (`benchmark` feature).

#![cfg(any(test, feature = "benchmark"))]

use std::path::{Path, PathBuf};

use crate::analysis::DriverLaps;
use crate::types::{LapRecord, Session, SessionKey, SessionType, lap_time};

/// Builder for [`LapRecord`]s that starts from a clean, timed lap
///
/// ```rust,ignore
/// let lap = LapBuilder::new("VER", 3).stint(1).compound("SOFT").time(78.9).build();
/// ```
#[derive(Debug, Clone)]
pub struct LapBuilder {
    record: LapRecord,
}

impl LapBuilder {
    /// Clean 90 s lap on stint 1
    pub fn new(driver_code: &str, lap_number: u32) -> Self {
        Self {
            record: LapRecord {
                driver_code: driver_code.to_string(),
                driver_number: "0".to_string(),
                lap_number,
                lap_time: lap_time::from_seconds(90.0),
                stint_id: Some(1),
                is_accurate: true,
                ..Default::default()
            },
        }
    }

    pub fn number(mut self, driver_number: &str) -> Self {
        self.record.driver_number = driver_number.to_string();
        self
    }

    /// Lap time in seconds
    pub fn time(mut self, seconds: f64) -> Self {
        self.record.lap_time = lap_time::from_seconds(seconds);
        self
    }

    pub fn untimed(mut self) -> Self {
        self.record.lap_time = None;
        self
    }

    pub fn stint(mut self, stint_id: u32) -> Self {
        self.record.stint_id = Some(stint_id);
        self
    }

    pub fn no_stint(mut self) -> Self {
        self.record.stint_id = None;
        self
    }

    pub fn compound(mut self, compound: &str) -> Self {
        self.record.compound = Some(compound.to_string());
        self
    }

    pub fn pit_in(mut self) -> Self {
        self.record.pit_in_flag = true;
        self
    }

    pub fn pit_out(mut self) -> Self {
        self.record.pit_out_flag = true;
        self
    }

    pub fn inaccurate(mut self) -> Self {
        self.record.is_accurate = false;
        self
    }

    pub fn deleted(mut self) -> Self {
        self.record.is_deleted = true;
        self
    }

    pub fn build(self) -> LapRecord {
        self.record
    }
}

/// Wrap one driver's laps for direct aggregator calls.
pub fn driver_laps(laps: &[LapRecord]) -> DriverLaps<'_> {
    DriverLaps {
        code: laps.first().map_or("", |lap| lap.driver_code.as_str()),
        laps: laps.iter().collect(),
    }
}

/// 2024 "Test Grand Prix" race holding `laps`.
pub fn session_with(laps: Vec<LapRecord>) -> Session {
    Session::new(SessionKey::new(2024, "Test", SessionType::Race), "Test Grand Prix", laps)
}

/// Synthetic race: `drivers` cars over `laps` laps with a pit stop at half distance.
///
/// Lap times drift with tire age and carry a small per-driver offset, giving every
/// aggregator realistic work.
pub fn synthetic_race(drivers: usize, laps: u32) -> Session {
    let pit_lap = laps / 2;
    let mut records = Vec::with_capacity(drivers * laps as usize);

    for lap_number in 1..=laps {
        for driver in 0..drivers {
            let stint = if lap_number <= pit_lap { 1 } else { 2 };
            let tire_age = if stint == 1 { lap_number } else { lap_number - pit_lap };
            let seconds = 80.0 + driver as f64 * 0.11 + f64::from(tire_age) * 0.045
                + f64::from((lap_number * 7 + driver as u32 * 3) % 5) * 0.02;

            let mut builder = LapBuilder::new(&format!("D{:02}", driver), lap_number)
                .number(&(driver + 1).to_string())
                .stint(stint)
                .compound(if stint == 1 { "MEDIUM" } else { "HARD" })
                .time(seconds);
            if lap_number == pit_lap {
                builder = builder.pit_in();
            }
            if lap_number == pit_lap + 1 || lap_number == 1 {
                builder = builder.pit_out();
            }
            records.push(builder.build());
        }
    }

    session_with(records)
}

/// Directory holding session document fixtures
pub fn sessions_fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join("sessions")
}

/// Path of a fixture relative to `test-data/sessions`, failing loudly if it is missing.
pub fn require_session_fixture(relative: &str) -> Result<PathBuf, String> {
    let path = sessions_fixture_dir().join(relative);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Missing session fixture: {}", path.display()))
    }
}
