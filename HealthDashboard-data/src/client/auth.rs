use serde::Serialize;
use tracing::debug;

use super::{ApiClient, ApiError};
use crate::models::{RegisterResponse, TokenResponse, UserProfile};

/// Login body for `POST token/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body for `POST register/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    /// "First Last", trimmed
    pub name: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Build a registration, deriving `name` from the first and last names
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let name = format!("{} {}", first_name, last_name).trim().to_string();

        Self {
            first_name,
            last_name,
            name,
            age: None,
            gender: None,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }
}

impl ApiClient {
    /// Exchange credentials for a token pair. Does not touch the session store.
    pub async fn request_token(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        debug!("Requesting token for {}", credentials.email);
        self.post_json("token/", credentials).await
    }

    /// Create an account; returns the created user from the server's response
    pub async fn register(&self, registration: &Registration) -> Result<UserProfile, ApiError> {
        debug!("Registering account for {}", registration.email);
        let response: RegisterResponse = self.post_json("register/", registration).await?;
        if let Some(message) = &response.message {
            debug!("Register response: {}", message);
        }
        Ok(response.user)
    }
}
