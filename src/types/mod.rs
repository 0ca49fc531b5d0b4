//! Core types for lap analysis.
//!
//! ## Architecture
//!
//! - [`LapRecord`] is one lap of one driver, read-only to the engine
//! - [`Session`] is the ordered lap collection plus its [`SessionKey`] and labels
//! - [`AnalysisType`] selects one of the four analytical views
//! - [`lap_time`] converts between [`chrono::TimeDelta`] and `f64` seconds and renders
//!   durations in the timing provider's text form
//!
//! ## Usage Example
//!
//! ```rust
//! use lapsight::types::{LapRecord, Session, SessionKey, SessionType, lap_time};
//!
//! let lap = LapRecord {
//!     driver_code: "VER".to_string(),
//!     driver_number: "1".to_string(),
//!     lap_number: 12,
//!     lap_time: lap_time::from_seconds(78.412),
//!     stint_id: Some(1),
//!     is_accurate: true,
//!     ..Default::default()
//! };
//!
//! let session = Session::new(SessionKey::new(2024, "Monaco", SessionType::Race), "Monaco Grand Prix", vec![lap]);
//! assert_eq!(session.driver_codes(), vec!["VER"]);
//! assert_eq!(session.name, "Race");
//! ```

mod analysis_type;
mod lap;
pub mod lap_time;
mod session;

pub use analysis_type::AnalysisType;
pub use lap::LapRecord;
pub use session::{Session, SessionKey, SessionType};
