use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Types of authentication events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthEventType {
    /// Token obtained for a user
    Login,
    /// Rejected login attempt
    FailedLogin,
    /// Stored session cleared
    Logout,
    /// Account creation
    Registration,
}

impl std::fmt::Display for AuthEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthEventType::Login => write!(f, "LOGIN"),
            AuthEventType::FailedLogin => write!(f, "FAILED_LOGIN"),
            AuthEventType::Logout => write!(f, "LOGOUT"),
            AuthEventType::Registration => write!(f, "REGISTRATION"),
        }
    }
}

/// Authentication event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    pub event_type: AuthEventType,
    /// Email or other identifier, when known
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub details: Option<String>,
    /// API base URL the event was against
    pub endpoint: Option<String>,
}

impl AuthEvent {
    pub fn new(event_type: AuthEventType, user: Option<&str>, success: bool) -> Self {
        Self {
            event_type,
            user: user.map(String::from),
            timestamp: Utc::now(),
            success,
            details: None,
            endpoint: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// The single-line form written to the log
    pub fn log_line(&self) -> String {
        let user = self.user.as_deref().unwrap_or("anonymous");
        let status = if self.success { "SUCCESS" } else { "FAILURE" };

        let mut line = format!(
            "AUTH-LOG [{}] [{}] [{}] [{}]",
            self.event_type,
            user,
            status,
            self.timestamp.to_rfc3339()
        );
        if let Some(details) = self.details.as_deref().filter(|d| !d.is_empty()) {
            line.push(' ');
            line.push_str(details);
        }
        if let Some(endpoint) = &self.endpoint {
            line.push_str(&format!(" ({})", endpoint));
        }
        line
    }
}

/// Log an authentication event; failures go out at `warn`
pub fn log_auth_event(event: &AuthEvent) {
    if event.success {
        info!("{}", event.log_line());
    } else {
        warn!("{}", event.log_line());
    }
}

pub fn log_successful_login(email: &str, endpoint: &str) {
    let event = AuthEvent::new(AuthEventType::Login, Some(email), true).with_endpoint(endpoint);
    log_auth_event(&event);
}

pub fn log_failed_login(email: &str, reason: &str) {
    let event = AuthEvent::new(AuthEventType::FailedLogin, Some(email), false).with_details(reason);
    log_auth_event(&event);
}

pub fn log_registration(email: &str, success: bool, details: Option<&str>) {
    let mut event = AuthEvent::new(AuthEventType::Registration, Some(email), success);

    if let Some(d) = details {
        event = event.with_details(d);
    }

    log_auth_event(&event);
}

pub fn log_logout(user: Option<&str>) {
    let event = AuthEvent::new(AuthEventType::Logout, user, true);
    log_auth_event(&event);
}
