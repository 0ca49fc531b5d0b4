//! # Session Documents
//!
//! A session document is the YAML export of one session's lap table, as produced by the
//! timing provider. It is the boundary format between session retrieval and analysis.
//!
//! ```text
//! Year: 2024
//! Event: Monaco
//! EventName: Monaco Grand Prix
//! SessionType: R
//! Laps:
//!   - Driver: LEC
//!     DriverNumber: "16"
//!     LapNumber: 2
//!     LapTime: 0 days 00:01:17.654000
//!     Stint: 1.0
//!     Compound: HARD
//!     IsAccurate: true
//!     Deleted: false
//! ```
//!
//! Documents are parsed strictly at the top level (an unknown session type fails) and
//! leniently per lap (see [`LapRow`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod lap_row;

pub use lap_row::{LapRow, RawCell};

use crate::types::{Session, SessionKey, SessionType};
use crate::{AnalysisError, Result};

/// One session's exported lap table plus its identity
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionDocument {
    /// Season year
    pub year: i32,
    /// Event identifier used for lookup
    pub event: String,
    /// Full event name
    pub event_name: String,
    /// Session code (`FP1`, `FP2`, `FP3`, `Q`, `S`, `R`)
    pub session_type: String,
    /// Session display name; defaults to the session type's name
    #[serde(default)]
    pub session_name: Option<String>,
    /// Lap table in provider order
    #[serde(default)]
    pub laps: Vec<LapRow>,
}

impl SessionDocument {
    /// Parse a session document from YAML.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml)
            .map_err(|e| AnalysisError::parse_error("SessionDocument deserialization", e.to_string()))
    }

    /// Session type named by the document.
    pub fn session_type(&self) -> Result<SessionType> {
        self.session_type.parse().map_err(|_| {
            AnalysisError::parse_error(
                "Session validation",
                format!("unknown session type '{}'", self.session_type),
            )
        })
    }

    /// Key identifying the session.
    pub fn key(&self) -> Result<SessionKey> {
        Ok(SessionKey::new(self.year, self.event.clone(), self.session_type()?))
    }

    /// Convert into a [`Session`] ready for analysis.
    pub fn into_session(self) -> Result<Session> {
        let key = self.key()?;
        let laps: Vec<_> = self.laps.into_iter().map(LapRow::into_record).collect();
        debug!(session = %key, laps = laps.len(), "Loaded session document");

        let session = Session::new(key, self.event_name, laps);
        Ok(match self.session_name {
            Some(name) if !name.is_empty() => session.with_name(name),
            _ => session,
        })
    }
}

impl Session {
    /// Parse a session document from YAML and convert it.
    pub fn parse(yaml: &str) -> Result<Self> {
        SessionDocument::parse(yaml)?.into_session()
    }
}
