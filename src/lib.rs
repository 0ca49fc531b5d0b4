//! Type-safe lap analytics for motor-racing sessions.
//!
//! Lapsight turns a session's per-lap timing records into four analytical views:
//!
//! - **Race pace**: mean, median and fastest clean lap per driver
//! - **Tire degradation**: first-to-last clean lap delta per stint
//! - **Stint summaries**: length, average and fastest lap per stint
//! - **Consistency**: lap time spread per driver, most consistent first
//!
//! The engine is a pure function of (session, request). Session retrieval sits behind
//! the [`SessionProvider`] trait and happens before analysis starts.
//!
//! ## Example
//!
//! ```rust
//! use lapsight::{AnalysisRequest, AnalysisType, LapAnalyzer, Session};
//!
//! let session = Session::parse(r#"
//! Year: 2024
//! Event: Monza
//! EventName: Italian Grand Prix
//! SessionType: R
//! Laps:
//!   - { Driver: LEC, DriverNumber: "16", LapNumber: 2, LapTime: 82.1, Stint: 1, IsAccurate: true, Deleted: false }
//!   - { Driver: LEC, DriverNumber: "16", LapNumber: 3, LapTime: 82.4, Stint: 1, IsAccurate: true, Deleted: false }
//! "#)?;
//!
//! let request = AnalysisRequest::new(AnalysisType::TireDegradation);
//! let response = LapAnalyzer::default().analyze(&session, &request);
//!
//! assert_eq!(response.total_records, 1);
//! println!("{}", response.to_json()?);
//! # Ok::<(), lapsight::AnalysisError>(())
//! ```

// Core types and error handling
mod config;
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Analysis engine
pub mod analysis;

// Session sources
pub mod provider;
pub mod providers;
pub mod schema;

// Core exports
pub use config::AnalysisConfig;
pub use error::*;
pub use types::{AnalysisType, LapRecord, Session, SessionKey, SessionType};

// Analysis exports
pub use analysis::{
    AnalysisRequest, AnalysisResponse, AnalysisRows, ConsistencyRow, DegradationRow, RacePaceRow,
    StintSummaryRow,
};

// Source exports
pub use provider::SessionProvider;
pub use providers::FileSessionProvider;
pub use schema::SessionDocument;

/// Unified entry point for lap analysis.
///
/// Holds the [`AnalysisConfig`] thresholds and runs requests against sessions that are
/// already loaded, or loads them through a [`SessionProvider`] first.
#[derive(Debug, Clone, Default)]
pub struct LapAnalyzer {
    config: AnalysisConfig,
}

impl LapAnalyzer {
    /// Create an analyzer with custom thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Config`] if a threshold is below its minimum.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Thresholds in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run one analysis over a loaded session.
    ///
    /// Never fails: drivers or stints without enough clean laps are simply absent
    /// from the response.
    pub fn analyze(&self, session: &Session, request: &AnalysisRequest) -> AnalysisResponse {
        analysis::analyze(session, request, &self.config)
    }

    /// Load a session through `provider`, then analyze it.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the session cannot be loaded.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lapsight::{AnalysisRequest, FileSessionProvider, LapAnalyzer, SessionKey, SessionType};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> lapsight::Result<()> {
    /// let provider = FileSessionProvider::new("sessions");
    /// let key = SessionKey::new(2024, "Monaco", SessionType::Race);
    /// let request = AnalysisRequest::parse("consistency", None)?;
    ///
    /// let response = LapAnalyzer::default().load_and_analyze(&provider, &key, &request).await?;
    /// println!("{} drivers ranked", response.total_records);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_and_analyze<P>(
        &self,
        provider: &P,
        key: &SessionKey,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse>
    where
        P: SessionProvider + ?Sized,
    {
        let session = provider.load_session(key).await?;
        Ok(self.analyze(&session, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LapBuilder, session_with};

    #[test]
    fn default_analyzer_uses_default_thresholds() {
        assert_eq!(LapAnalyzer::default().config(), &AnalysisConfig::default());
    }

    #[test]
    fn custom_thresholds_are_validated_and_applied() {
        let config = AnalysisConfig { min_degradation_laps: 2, min_consistency_laps: 2 };
        let analyzer = LapAnalyzer::new(config).unwrap();
        assert_eq!(analyzer.config().min_consistency_laps, 2);

        let session = session_with(vec![
            LapBuilder::new("VER", 1).time(80.0).build(),
            LapBuilder::new("VER", 2).time(80.4).build(),
        ]);
        let response = analyzer.analyze(&session, &AnalysisRequest::new(AnalysisType::Consistency));
        assert_eq!(response.total_records, 1);

        let err = LapAnalyzer::new(AnalysisConfig { min_degradation_laps: 1, ..config }).unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }
}
