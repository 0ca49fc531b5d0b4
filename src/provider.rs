//! Provider trait for session sources

use crate::Result;
use crate::types::{Session, SessionKey};

/// Trait for session data sources
///
/// Providers own retrieval and any caching of session data. The analysis engine only
/// ever sees the [`Session`] a provider hands back; it never calls into a provider
/// itself.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Load the lap collection for one session
    ///
    /// Returns:
    /// - `Ok(session)` - Session loaded with all of its laps
    /// - `Err(SessionNotFound)` - No such session at this source
    /// - `Err(e)` - Retrieval or parsing failed
    async fn load_session(&self, key: &SessionKey) -> Result<Session>;
}
