//! # Lap Analysis Engine
//!
//! Turns a session's lap records into one of four analytical views.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     analyze()                            │
//! │                                                          │
//! │  Session ──► resolve_drivers ──► per driver:             │
//! │                                   │                      │
//! │              ┌────────────────────┼──────────────┐       │
//! │              ▼                    ▼              ▼       │
//! │        clean-lap filter    group_by_stint   aggregator   │
//! │              │                    │              │       │
//! │              └────────────────────┴──────► rows ─┘       │
//! │                                              │           │
//! │                         AnalysisResponse ◄───┘           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Drivers and stints lacking enough clean laps are left out of the response. A failure
//! while aggregating one driver is logged and skips only that driver.

use chrono::TimeDelta;
use tracing::{debug, warn};

use crate::types::{AnalysisType, Session, lap_time};
use crate::{AnalysisConfig, AnalysisError, Result};

pub mod consistency;
pub mod degradation;
pub mod filter;
pub mod race_pace;
mod response;
mod scope;
pub mod stats;
pub mod stint;
pub mod stint_summary;

pub use consistency::ConsistencyRow;
pub use degradation::DegradationRow;
pub use filter::{is_clean_for_pace, is_clean_for_stint};
pub use race_pace::RacePaceRow;
pub use response::{AnalysisResponse, AnalysisRows};
pub use scope::{DriverLaps, resolve_drivers};
pub use stint::{Stint, group_by_stint};
pub use stint_summary::StintSummaryRow;

/// What to compute and for whom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub analysis_type: AnalysisType,
    /// Driver code or number; `None` analyzes every driver
    pub driver_filter: Option<String>,
}

impl AnalysisRequest {
    /// Request an analysis of every driver.
    pub fn new(analysis_type: AnalysisType) -> Self {
        Self { analysis_type, driver_filter: None }
    }

    /// Restrict the analysis to one driver. An empty identifier means no filter.
    pub fn for_driver(mut self, driver: impl Into<String>) -> Self {
        let driver = driver.into();
        self.driver_filter = (!driver.is_empty()).then_some(driver);
        self
    }

    /// Build a request from its wire form.
    ///
    /// Fails with [`AnalysisError::UnsupportedAnalysisType`] for an unknown tag.
    pub fn parse(analysis_type: &str, driver: Option<&str>) -> Result<Self> {
        let request = Self::new(analysis_type.parse()?);
        Ok(match driver {
            Some(driver) => request.for_driver(driver),
            None => request,
        })
    }
}

/// Convert an aggregate in seconds back to a duration.
pub(crate) fn duration(seconds: f64) -> Result<TimeDelta> {
    lap_time::from_seconds(seconds)
        .ok_or_else(|| AnalysisError::time_conversion(format!("{} s is not a representable duration", seconds)))
}

/// Run one analysis over a loaded session.
pub fn analyze(session: &Session, request: &AnalysisRequest, config: &AnalysisConfig) -> AnalysisResponse {
    let analysis_type = request.analysis_type;
    let drivers = resolve_drivers(session, request.driver_filter.as_deref());

    debug!(
        session = %session.key,
        analysis = %analysis_type,
        drivers = drivers.len(),
        filter = ?request.driver_filter,
        "Running lap analysis"
    );

    let rows = match analysis_type {
        AnalysisType::RacePace => {
            AnalysisRows::RacePace(collect_rows(&drivers, config, analysis_type, race_pace::analyze_driver))
        }
        AnalysisType::TireDegradation => AnalysisRows::TireDegradation(collect_rows(
            &drivers,
            config,
            analysis_type,
            degradation::analyze_driver,
        )),
        AnalysisType::StintSummary => AnalysisRows::StintSummaries(collect_rows(
            &drivers,
            config,
            analysis_type,
            stint_summary::analyze_driver,
        )),
        AnalysisType::Consistency => {
            let mut rows = collect_rows(&drivers, config, analysis_type, consistency::analyze_driver);
            consistency::rank(&mut rows);
            AnalysisRows::Consistency(rows)
        }
    };

    AnalysisResponse {
        session_name: session.name.clone(),
        event_name: session.event_name.clone(),
        year: session.year(),
        analysis_type,
        total_records: rows.len(),
        driver_filter: request.driver_filter.clone(),
        rows,
    }
}

fn collect_rows<'a, R, F>(
    drivers: &[DriverLaps<'a>],
    config: &AnalysisConfig,
    analysis_type: AnalysisType,
    aggregate: F,
) -> Vec<R>
where
    F: Fn(&DriverLaps<'a>, &AnalysisConfig) -> Result<Vec<R>>,
{
    let mut rows = Vec::new();
    for driver in drivers {
        match aggregate(driver, config) {
            Ok(driver_rows) if driver_rows.is_empty() => {
                debug!(driver = driver.code, analysis = %analysis_type, "No rows for driver");
            }
            Ok(driver_rows) => rows.extend(driver_rows),
            Err(e) => {
                warn!(driver = driver.code, analysis = %analysis_type, error = %e, "Skipping driver");
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LapBuilder, session_with};

    #[test]
    fn request_parse_rejects_unknown_type() {
        let err = AnalysisRequest::parse("lap_chart", None).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedAnalysisType { .. }));
    }

    #[test]
    fn empty_driver_means_no_filter() {
        let request = AnalysisRequest::parse("race_pace", Some("")).unwrap();
        assert_eq!(request.driver_filter, None);

        let request = AnalysisRequest::parse("race_pace", Some("VER")).unwrap();
        assert_eq!(request.driver_filter.as_deref(), Some("VER"));
    }

    #[test]
    fn envelope_carries_session_labels_and_filter() {
        let session = session_with(vec![LapBuilder::new("VER", 1).number("1").time(80.0).build()]);
        let request = AnalysisRequest::new(AnalysisType::RacePace).for_driver("1");

        let response = analyze(&session, &request, &AnalysisConfig::default());
        assert_eq!(response.session_name, "Race");
        assert_eq!(response.event_name, "Test Grand Prix");
        assert_eq!(response.year, 2024);
        assert_eq!(response.analysis_type, AnalysisType::RacePace);
        assert_eq!(response.driver_filter.as_deref(), Some("1"));
        assert_eq!(response.total_records, 1);
        assert_eq!(response.race_pace().unwrap()[0].driver_code, "VER");
        assert!(response.consistency().is_none());
    }

    #[test]
    fn rows_follow_driver_then_stint_order() {
        let session = session_with(vec![
            LapBuilder::new("NOR", 1).stint(1).time(81.0).build(),
            LapBuilder::new("LEC", 1).stint(1).time(80.0).build(),
            LapBuilder::new("NOR", 2).stint(2).time(81.5).build(),
            LapBuilder::new("LEC", 2).stint(2).time(80.5).build(),
        ]);

        let response = analyze(&session, &AnalysisRequest::new(AnalysisType::StintSummary), &AnalysisConfig::default());
        let order: Vec<(String, u32)> =
            response.stint_summaries().unwrap().iter().map(|r| (r.driver_code.clone(), r.stint)).collect();
        assert_eq!(
            order,
            vec![
                ("NOR".to_string(), 1),
                ("NOR".to_string(), 2),
                ("LEC".to_string(), 1),
                ("LEC".to_string(), 2),
            ]
        );
    }

    #[test]
    fn failing_driver_is_skipped_alone() {
        let mut broken = LapBuilder::new("X", 1).number("99").build();
        broken.lap_time = Some(TimeDelta::MAX);
        let session = session_with(vec![broken, LapBuilder::new("Y", 1).number("7").time(81.2).build()]);

        let response = analyze(&session, &AnalysisRequest::new(AnalysisType::RacePace), &AnalysisConfig::default());
        let drivers: Vec<&str> = response.race_pace().unwrap().iter().map(|r| r.driver_code.as_str()).collect();
        assert_eq!(drivers, vec!["Y"]);
        assert_eq!(response.total_records, 1);
    }

    #[test]
    fn extreme_stint_delta_skips_only_that_driver() {
        let mut laps = vec![
            LapBuilder::new("Z", 1).stint(1).build(),
            LapBuilder::new("Z", 2).stint(1).build(),
            LapBuilder::new("Y", 1).stint(1).time(80.0).build(),
            LapBuilder::new("Y", 2).stint(1).time(80.3).build(),
        ];
        laps[0].lap_time = Some(TimeDelta::MIN);
        laps[1].lap_time = Some(TimeDelta::MAX);
        let session = session_with(laps);

        let response =
            analyze(&session, &AnalysisRequest::new(AnalysisType::TireDegradation), &AnalysisConfig::default());
        let rows = response.tire_degradation().unwrap();
        assert_eq!(response.total_records, 1);
        assert_eq!(rows[0].driver_code, "Y");
        assert_eq!(rows[0].degradation, TimeDelta::milliseconds(300));
    }

    #[test]
    fn unknown_driver_yields_empty_response() {
        let session = session_with(vec![LapBuilder::new("VER", 1).time(80.0).build()]);
        for analysis_type in AnalysisType::ALL {
            let request = AnalysisRequest::new(analysis_type).for_driver("XYZ");
            let response = analyze(&session, &request, &AnalysisConfig::default());
            assert_eq!(response.total_records, 0);
            assert!(response.rows.is_empty());
            assert_eq!(response.rows.analysis_type(), analysis_type);
        }
    }

    #[test]
    fn response_json_uses_view_key() {
        let session = session_with(vec![LapBuilder::new("VER", 1).stint(1).time(80.0).build()]);
        let response = analyze(&session, &AnalysisRequest::new(AnalysisType::StintSummary), &AnalysisConfig::default());

        let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["analysis_type"], "stint_summary");
        assert_eq!(json["total_records"], 1);
        assert_eq!(json["stint_summaries"][0]["average_lap_time"], "0 days 00:01:20");
        assert!(json.get("driver_filter").is_none());
        assert!(json.get("race_pace").is_none());
    }

    #[test]
    fn response_survives_json_round_trip() {
        let session = session_with(vec![
            LapBuilder::new("VER", 1).stint(1).time(80.1).build(),
            LapBuilder::new("VER", 2).stint(1).time(79.7).build(),
        ]);
        let response =
            analyze(&session, &AnalysisRequest::new(AnalysisType::TireDegradation), &AnalysisConfig::default());

        let parsed: AnalysisResponse = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(parsed, response);
        assert_eq!(parsed.tire_degradation().unwrap()[0].degradation, TimeDelta::milliseconds(-400));
    }
}
