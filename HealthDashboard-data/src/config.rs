use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

/// Default origin of the metrics API, including the `/api/` prefix
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File name of the persisted session inside the data directory
pub const SESSION_FILE_NAME: &str = "user.json";

/// Configuration for [`ApiClient`](crate::ApiClient) and the file-backed session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every resource path is joined onto
    pub base_url: String,

    /// Timeout applied to each HTTP request
    pub timeout: Duration,

    /// Location of the persisted session
    pub session_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_path: default_session_path(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from environment variables.
    ///
    /// Reads `HEALTH_API_URL`, `HEALTH_API_TIMEOUT_SECS` and
    /// `HEALTH_SESSION_PATH`, falling back to the defaults for anything unset
    /// or unparseable.
    pub fn from_env() -> Self {
        let base_url = env::var("HEALTH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("HEALTH_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
                warn!("Ignoring invalid HEALTH_API_TIMEOUT_SECS value: {}", raw);
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let session_path = env::var("HEALTH_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_path());

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            session_path,
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override where the session file lives
    pub fn with_session_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_path = path.as_ref().to_path_buf();
        self
    }
}

/// Platform data directory for the session file, e.g.
/// `~/.local/share/health-dashboard/user.json` on Linux
pub fn default_session_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("health-dashboard").join(SESSION_FILE_NAME),
        None => PathBuf::from(".health-dashboard").join(SESSION_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.session_path.ends_with("user.json"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::default()
            .with_base_url("http://example.test/api/")
            .with_timeout(Duration::from_secs(5))
            .with_session_path("/tmp/session.json");

        assert_eq!(config.base_url, "http://example.test/api/");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.session_path, PathBuf::from("/tmp/session.json"));
    }
}
