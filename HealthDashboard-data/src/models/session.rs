use serde::{Deserialize, Serialize};

/// Profile of the authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server identifier
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub gender: Option<String>,
}

impl UserProfile {
    /// "First Last", trimmed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Response of `POST token/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests
    pub access: String,

    /// Refresh token; never used by this client
    #[serde(default)]
    pub refresh: Option<String>,

    /// Profile, when the server includes one
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Response of `POST register/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The created account
    pub user: UserProfile,

    #[serde(default)]
    pub message: Option<String>,
}

/// The single authenticated identity held by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to authenticated requests
    #[serde(alias = "access")]
    pub access_token: String,

    #[serde(default, alias = "refresh", skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl Session {
    /// Session holding only an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            user: None,
        }
    }

    /// Attach a user profile
    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = Some(user);
        self
    }

    /// Whether the session carries a usable bearer token
    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

impl From<TokenResponse> for Session {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access,
            refresh_token: response.refresh,
            user: response.user,
        }
    }
}
