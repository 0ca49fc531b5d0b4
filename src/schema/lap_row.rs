//! Lap rows as exported by the timing provider
//!
//! Column names follow the provider's lap table (`Driver`, `LapTime`, `PitInTime`, ...).
//! Rows are lenient: numeric and flag columns are read as [`RawCell`]s, and a cell that
//! cannot be interpreted is logged and dropped. The lap then fails the clean-lap filters
//! instead of failing the whole session.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{LapRecord, lap_time};

/// One cell of the lap table, before interpretation
///
/// The provider writes floats for integer columns (`Stint: 1.0`), text or seconds for
/// lap times, and occasionally quoted numbers or flags. [`RawCell::Other`] keeps any
/// remaining YAML shape so deserialization never fails on a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_yaml_ng::Value),
}

impl RawCell {
    /// Pandas-style missing markers (`NaN`, `NaT`, empty text) read as absent.
    fn is_missing(&self) -> bool {
        match self {
            RawCell::Number(n) => n.is_nan(),
            RawCell::Text(text) => !is_present(Some(text.as_str())),
            RawCell::Other(value) => value.is_null(),
            RawCell::Bool(_) => false,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Number(n) => Some(*n),
            RawCell::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    fn as_whole_number(&self) -> Option<u32> {
        self.as_number().and_then(whole_number)
    }

    fn as_duration(&self) -> Option<chrono::TimeDelta> {
        match self {
            RawCell::Number(seconds) => lap_time::from_seconds(*seconds),
            RawCell::Text(text) => lap_time::parse_timedelta(text),
            _ => None,
        }
    }

    fn as_flag(&self) -> Option<bool> {
        match self {
            RawCell::Bool(flag) => Some(*flag),
            RawCell::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn as_label(&self) -> Option<String> {
        match self {
            RawCell::Text(text) => Some(text.trim().to_string()),
            RawCell::Number(_) => self.as_whole_number().map(|n| n.to_string()),
            _ => None,
        }
    }
}

/// One row of the provider's lap table
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[serde(default)]
pub struct LapRow {
    /// Driver abbreviation
    pub driver: String,
    /// Driver number, quoted or bare
    pub driver_number: Option<RawCell>,
    /// Team name
    pub team: Option<String>,
    /// Lap number (the provider emits floats such as `2.0`)
    pub lap_number: Option<RawCell>,
    /// Lap time as seconds or timedelta text
    pub lap_time: Option<RawCell>,
    /// Stint number (the provider emits floats such as `1.0`)
    pub stint: Option<RawCell>,
    /// Tire compound
    pub compound: Option<String>,
    /// Session time of pit entry
    pub pit_in_time: Option<String>,
    /// Session time of pit exit
    pub pit_out_time: Option<String>,
    /// Whether the lap time is accurate
    pub is_accurate: Option<RawCell>,
    /// Whether the lap was deleted
    pub deleted: Option<RawCell>,
}

impl LapRow {
    /// Convert to a [`LapRecord`].
    ///
    /// Unknown accuracy counts as inaccurate and unknown deletion status counts as
    /// deleted, so neither can make a lap clean. A lap whose number cannot be read is
    /// kept with lap number 0 and marked inaccurate.
    pub fn into_record(self) -> LapRecord {
        let driver = self.driver;

        let lap_number_given = self.lap_number.as_ref().is_some_and(|cell| !cell.is_missing());
        let lap_number = interpret_cell(&driver, "LapNumber", self.lap_number, RawCell::as_whole_number);
        let lap_time = interpret_cell(&driver, "LapTime", self.lap_time, RawCell::as_duration);
        let stint_id = interpret_cell(&driver, "Stint", self.stint, RawCell::as_whole_number);
        let is_accurate = interpret_cell(&driver, "IsAccurate", self.is_accurate, RawCell::as_flag);
        let is_deleted = interpret_cell(&driver, "Deleted", self.deleted, RawCell::as_flag);
        let driver_number = interpret_cell(&driver, "DriverNumber", self.driver_number, RawCell::as_label);

        // a lap that cannot be placed in sequence is never trusted
        let lap_number_known = lap_number.is_some() || !lap_number_given;

        LapRecord {
            driver_number: driver_number.unwrap_or_default(),
            team: self.team.filter(|team| !team.is_empty()),
            lap_number: lap_number.unwrap_or(0),
            lap_time,
            stint_id,
            compound: self.compound.filter(|compound| !compound.is_empty()),
            pit_in_flag: is_present(self.pit_in_time.as_deref()),
            pit_out_flag: is_present(self.pit_out_time.as_deref()),
            is_accurate: is_accurate.unwrap_or(false) && lap_number_known,
            is_deleted: is_deleted.unwrap_or(true),
            driver_code: driver,
        }
    }
}

/// Interpret one cell. Missing cells are silently absent; uninterpretable ones warn.
fn interpret_cell<T>(
    driver: &str,
    column: &str,
    cell: Option<RawCell>,
    interpret: fn(&RawCell) -> Option<T>,
) -> Option<T> {
    let cell = cell.filter(|cell| !cell.is_missing())?;
    let value = interpret(&cell);
    if value.is_none() {
        warn!(driver = %driver, column, raw = ?cell, "Uninterpretable lap cell");
    }
    value
}

fn whole_number(raw: f64) -> Option<u32> {
    (raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= f64::from(u32::MAX)).then_some(raw as u32)
}

/// Pit timestamps are exported as empty text or `NaT` when absent.
fn is_present(timestamp: Option<&str>) -> bool {
    timestamp.is_some_and(|ts| {
        let ts = ts.trim();
        !ts.is_empty() && !ts.eq_ignore_ascii_case("nat")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn text(value: &str) -> Option<RawCell> {
        Some(RawCell::Text(value.to_string()))
    }

    fn number(value: f64) -> Option<RawCell> {
        Some(RawCell::Number(value))
    }

    fn flag(value: bool) -> Option<RawCell> {
        Some(RawCell::Bool(value))
    }

    fn row() -> LapRow {
        LapRow {
            driver: "PIA".to_string(),
            driver_number: text("81"),
            team: Some("McLaren".to_string()),
            lap_number: number(14.0),
            lap_time: text("0 days 00:01:21.337000"),
            stint: number(2.0),
            compound: Some("HARD".to_string()),
            is_accurate: flag(true),
            deleted: flag(false),
            ..Default::default()
        }
    }

    #[test]
    fn converts_complete_row() {
        let record = row().into_record();
        assert_eq!(record.driver_code, "PIA");
        assert_eq!(record.driver_number, "81");
        assert_eq!(record.lap_number, 14);
        assert_eq!(record.lap_time, Some(TimeDelta::milliseconds(81_337)));
        assert_eq!(record.stint_id, Some(2));
        assert_eq!(record.compound.as_deref(), Some("HARD"));
        assert!(!record.pit_in_flag && !record.pit_out_flag);
        assert!(record.is_accurate && !record.is_deleted);
    }

    #[test]
    fn pit_timestamps_set_flags() {
        let record = LapRow {
            pit_in_time: Some("0 days 01:02:03.000000".to_string()),
            pit_out_time: Some("NaT".to_string()),
            ..row()
        }
        .into_record();
        assert!(record.pit_in_flag);
        assert!(!record.pit_out_flag);
    }

    #[test]
    fn lap_time_accepts_seconds_and_missing_markers() {
        assert_eq!(LapRow { lap_time: number(77.5), ..row() }.into_record().lap_time, Some(TimeDelta::milliseconds(77_500)));
        assert_eq!(LapRow { lap_time: text("NaT"), ..row() }.into_record().lap_time, None);
        assert_eq!(LapRow { lap_time: number(f64::NAN), ..row() }.into_record().lap_time, None);
    }

    #[test]
    fn unparsable_lap_time_becomes_absent() {
        assert_eq!(LapRow { lap_time: text("DNF"), ..row() }.into_record().lap_time, None);
        assert_eq!(LapRow { lap_time: flag(true), ..row() }.into_record().lap_time, None);
    }

    #[test]
    fn fractional_or_negative_stint_is_dropped() {
        assert_eq!(LapRow { stint: number(1.5), ..row() }.into_record().stint_id, None);
        assert_eq!(LapRow { stint: number(-1.0), ..row() }.into_record().stint_id, None);
        assert_eq!(LapRow { stint: number(f64::INFINITY), ..row() }.into_record().stint_id, None);
        assert_eq!(LapRow { stint: text("1"), ..row() }.into_record().stint_id, Some(1));
    }

    #[test]
    fn unreadable_lap_number_marks_lap_inaccurate() {
        let record = LapRow { lap_number: text("fourteen"), ..row() }.into_record();
        assert_eq!(record.lap_number, 0);
        assert!(!record.is_accurate);
    }

    #[test]
    fn flags_accept_text_and_reject_other_shapes() {
        assert!(LapRow { is_accurate: text("True"), ..row() }.into_record().is_accurate);
        assert!(!LapRow { is_accurate: number(1.0), ..row() }.into_record().is_accurate);
        assert!(LapRow { deleted: text("maybe"), ..row() }.into_record().is_deleted);
    }

    #[test]
    fn bare_driver_number_is_accepted() {
        assert_eq!(LapRow { driver_number: number(16.0), ..row() }.into_record().driver_number, "16");
    }

    #[test]
    fn unknown_flags_never_make_a_lap_clean() {
        let record = LapRow { is_accurate: None, deleted: None, ..row() }.into_record();
        assert!(!record.is_accurate);
        assert!(record.is_deleted);
    }
}
