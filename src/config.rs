//! Analysis thresholds

use serde::{Deserialize, Serialize};

use crate::{AnalysisError, Result};

/// Minimum sample sizes gating the stint and driver aggregates
///
/// ```rust
/// use lapsight::AnalysisConfig;
///
/// let config = AnalysisConfig::from_yaml("min_consistency_laps: 5").unwrap();
/// assert_eq!(config.min_consistency_laps, 5);
/// assert_eq!(config.min_degradation_laps, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Clean laps a stint needs before degradation is reported
    pub min_degradation_laps: usize,
    /// Clean laps a driver needs before consistency is reported
    pub min_consistency_laps: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { min_degradation_laps: 2, min_consistency_laps: 3 }
    }
}

impl AnalysisConfig {
    /// Parse a config from YAML, filling omitted keys with defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_yaml_ng::from_str(yaml)
            .map_err(|e| AnalysisError::parse_error("AnalysisConfig deserialization", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Degradation needs a first and a last lap; a sample deviation needs two samples.
    pub fn validate(&self) -> Result<()> {
        if self.min_degradation_laps < 2 {
            return Err(AnalysisError::config(format!(
                "min_degradation_laps must be at least 2, got {}",
                self.min_degradation_laps
            )));
        }
        if self.min_consistency_laps < 2 {
            return Err(AnalysisError::config(format!(
                "min_consistency_laps must be at least 2, got {}",
                self.min_consistency_laps
            )));
        }
        Ok(())
    }
}
