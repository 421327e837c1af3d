use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::errors::SessionError;
use super::{parse_stored_session, SessionStore};
use crate::models::Session;

/// Session store backed by a single JSON file.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write never leaves a half-written session behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store the session at `path`; parent directories are created on save
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        self.path.with_extension(format!("{}.tmp", extension))
    }
}

impl SessionStore for FileSessionStore {
    fn save_session(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_string_pretty(session)?;
        let tmp_path = self.temp_path();

        let result = fs::write(&tmp_path, serialized).and_then(|_| fs::rename(&tmp_path, &self.path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    fn current_session(&self) -> Option<Session> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_stored_session(&raw, &self.path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
