//! File provider for exported session documents

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::provider::SessionProvider;
use crate::schema::SessionDocument;
use crate::types::{Session, SessionKey};
use crate::{AnalysisError, Result};

/// Session provider reading YAML documents from a directory tree
///
/// Layout: `<root>/<year>/<event-slug>/<CODE>.yaml`, e.g.
/// `sessions/2024/monaco/R.yaml` or `sessions/2024/são-paulo/S.yaml`.
#[derive(Debug, Clone)]
pub struct FileSessionProvider {
    root: PathBuf,
}

impl FileSessionProvider {
    /// Create a provider rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Root directory of the export tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document holding `key`
    pub fn path_for(&self, key: &SessionKey) -> PathBuf {
        self.root
            .join(key.year.to_string())
            .join(event_slug(&key.event))
            .join(format!("{}.yaml", key.session_type.code()))
    }
}

/// Lowercase the event name and collapse every run of non-alphanumerics into one `-`.
pub fn event_slug(event: &str) -> String {
    let mut slug = String::with_capacity(event.len());
    for ch in event.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[async_trait::async_trait]
impl SessionProvider for FileSessionProvider {
    async fn load_session(&self, key: &SessionKey) -> Result<Session> {
        let path = self.path_for(key);
        debug!("Reading session document: {}", path.display());

        let yaml = match tokio::fs::read_to_string(&path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AnalysisError::SessionNotFound { key: key.to_string() });
            }
            Err(e) => return Err(AnalysisError::file_error(path, e)),
        };

        let document = SessionDocument::parse(&yaml)?;
        let found = document.key()?;
        if found.year != key.year || found.session_type != key.session_type {
            return Err(AnalysisError::parse_error(
                "Session validation",
                format!("{} holds {} instead of {}", path.display(), found, key),
            ));
        }

        let session = document.into_session()?;
        info!("Loaded {} ({} laps)", session.key, session.laps.len());
        Ok(session)
    }
}
