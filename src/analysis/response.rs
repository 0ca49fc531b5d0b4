//! Response envelope

use serde::{Deserialize, Serialize};

use super::{ConsistencyRow, DegradationRow, RacePaceRow, StintSummaryRow};
use crate::types::AnalysisType;
use crate::{AnalysisError, Result};

/// Rows of exactly one analysis type
///
/// Serialized under the key naming the view (`race_pace`, `tire_degradation`,
/// `stint_summaries` or `consistency`) so the envelope carries a single list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
pub enum AnalysisRows {
    RacePace(Vec<RacePaceRow>),
    TireDegradation(Vec<DegradationRow>),
    StintSummaries(Vec<StintSummaryRow>),
    Consistency(Vec<ConsistencyRow>),
}

impl AnalysisRows {
    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            AnalysisRows::RacePace(rows) => rows.len(),
            AnalysisRows::TireDegradation(rows) => rows.len(),
            AnalysisRows::StintSummaries(rows) => rows.len(),
            AnalysisRows::Consistency(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Analysis type these rows belong to.
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            AnalysisRows::RacePace(_) => AnalysisType::RacePace,
            AnalysisRows::TireDegradation(_) => AnalysisType::TireDegradation,
            AnalysisRows::StintSummaries(_) => AnalysisType::StintSummary,
            AnalysisRows::Consistency(_) => AnalysisType::Consistency,
        }
    }
}

/// Result of one analysis request over one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct AnalysisResponse {
    /// Session display name (e.g. `Race`)
    pub session_name: String,
    /// Event name (e.g. `Monaco Grand Prix`)
    pub event_name: String,
    /// Season year
    pub year: i32,
    pub analysis_type: AnalysisType,
    /// Number of rows emitted
    pub total_records: usize,
    /// Driver filter that was applied, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_filter: Option<String>,
    #[serde(flatten)]
    pub rows: AnalysisRows,
}

impl AnalysisResponse {
    /// Race pace rows, if this is a race pace response.
    pub fn race_pace(&self) -> Option<&[RacePaceRow]> {
        match &self.rows {
            AnalysisRows::RacePace(rows) => Some(rows),
            _ => None,
        }
    }

    /// Degradation rows, if this is a tire degradation response.
    pub fn tire_degradation(&self) -> Option<&[DegradationRow]> {
        match &self.rows {
            AnalysisRows::TireDegradation(rows) => Some(rows),
            _ => None,
        }
    }

    /// Stint summary rows, if this is a stint summary response.
    pub fn stint_summaries(&self) -> Option<&[StintSummaryRow]> {
        match &self.rows {
            AnalysisRows::StintSummaries(rows) => Some(rows),
            _ => None,
        }
    }

    /// Consistency rows, if this is a consistency response.
    pub fn consistency(&self) -> Option<&[ConsistencyRow]> {
        match &self.rows {
            AnalysisRows::Consistency(rows) => Some(rows),
            _ => None,
        }
    }

    /// Render the envelope as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| AnalysisError::parse_error("AnalysisResponse serialization", e.to_string()))
    }
}
