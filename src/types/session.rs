//! Session identity and the loaded lap collection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LapRecord;
use crate::AnalysisError;

/// Session type within a race weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SessionType {
    #[serde(rename = "FP1")]
    Practice1,
    #[serde(rename = "FP2")]
    Practice2,
    #[serde(rename = "FP3")]
    Practice3,
    #[serde(rename = "Q")]
    Qualifying,
    #[serde(rename = "S")]
    Sprint,
    #[serde(rename = "R")]
    Race,
}

impl SessionType {
    /// All session types in weekend order.
    pub const ALL: [SessionType; 6] = [
        SessionType::Practice1,
        SessionType::Practice2,
        SessionType::Practice3,
        SessionType::Qualifying,
        SessionType::Sprint,
        SessionType::Race,
    ];

    /// Short code used by the timing provider (`FP1`, `Q`, `R`, ...).
    pub fn code(self) -> &'static str {
        match self {
            SessionType::Practice1 => "FP1",
            SessionType::Practice2 => "FP2",
            SessionType::Practice3 => "FP3",
            SessionType::Qualifying => "Q",
            SessionType::Sprint => "S",
            SessionType::Race => "R",
        }
    }

    /// Human-readable session name.
    pub fn display_name(self) -> &'static str {
        match self {
            SessionType::Practice1 => "Practice 1",
            SessionType::Practice2 => "Practice 2",
            SessionType::Practice3 => "Practice 3",
            SessionType::Qualifying => "Qualifying",
            SessionType::Sprint => "Sprint",
            SessionType::Race => "Race",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SessionType {
    type Err = AnalysisError;

    /// Accepts codes and display names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SessionType::ALL
            .into_iter()
            .find(|ty| {
                wanted.eq_ignore_ascii_case(ty.code()) || wanted.eq_ignore_ascii_case(ty.display_name())
            })
            .ok_or_else(|| AnalysisError::unsupported_session_type(s))
    }
}

/// Identifies one session: season year, event and session type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionKey {
    /// Season year
    pub year: i32,
    /// Event identifier (e.g. `Monaco`)
    pub event: String,
    /// Session within the event
    pub session_type: SessionType,
}

impl SessionKey {
    pub fn new(year: i32, event: impl Into<String>, session_type: SessionType) -> Self {
        Self { year, event: event.into(), session_type }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.event, self.session_type)
    }
}

/// A loaded session: identity, labels and the ordered lap collection
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Session identity
    pub key: SessionKey,
    /// Display name of the session (e.g. `Race`)
    pub name: String,
    /// Full event name (e.g. `Monaco Grand Prix`)
    pub event_name: String,
    /// Lap records in provider order
    pub laps: Vec<LapRecord>,
}

impl Session {
    /// Create a session named after its session type.
    pub fn new(key: SessionKey, event_name: impl Into<String>, laps: Vec<LapRecord>) -> Self {
        let name = key.session_type.display_name().to_string();
        Self { key, name, event_name: event_name.into(), laps }
    }

    /// Override the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Season year
    pub fn year(&self) -> i32 {
        self.key.year
    }

    /// Distinct driver codes in order of first appearance.
    pub fn driver_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::new();
        for lap in &self.laps {
            if !codes.contains(&lap.driver_code.as_str()) {
                codes.push(&lap.driver_code);
            }
        }
        codes
    }
}
