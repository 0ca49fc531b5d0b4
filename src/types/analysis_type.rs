//! Analysis type selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AnalysisError;

/// The four analytical views over a session's laps
///
/// Each variant is bound to exactly one aggregator; a response never mixes row shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Mean, median and fastest clean lap per driver
    RacePace,
    /// First-to-last clean lap delta per stint
    TireDegradation,
    /// Average and fastest lap per stint
    StintSummary,
    /// Lap time spread per driver, most consistent first
    Consistency,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 4] = [
        AnalysisType::RacePace,
        AnalysisType::TireDegradation,
        AnalysisType::StintSummary,
        AnalysisType::Consistency,
    ];

    /// Wire tag of this analysis type.
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisType::RacePace => "race_pace",
            AnalysisType::TireDegradation => "tire_degradation",
            AnalysisType::StintSummary => "stint_summary",
            AnalysisType::Consistency => "consistency",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| AnalysisError::unsupported_analysis_type(s))
    }
}
