pub mod logging;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use validator::Validate;

use health_dashboard_data::models::{Session, UserProfile};
use health_dashboard_data::{ApiClient, ApiError, Credentials, Registration, SessionError, SessionStore};

use self::logging::{log_failed_login, log_logout, log_registration, log_successful_login};

/// Error type for login, registration and logout
#[derive(Error, Debug)]
pub enum AuthServiceError {
    /// The request failed local validation and was never sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The server answered without a usable access token
    #[error("The server did not return an access token")]
    MissingToken,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<validator::ValidationErrors> for AuthServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthServiceError::Validation(errors.to_string())
    }
}

/// Login form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[validate(range(min = 1, max = 130, message = "Age must be between 1 and 130"))]
    pub age: Option<u32>,

    pub gender: Option<String>,

    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl From<&RegistrationRequest> for Registration {
    fn from(request: &RegistrationRequest) -> Self {
        let mut registration = Registration::new(
            request.first_name.as_str(),
            request.last_name.as_str(),
            request.email.as_str(),
            request.password.as_str(),
        );
        if let Some(age) = request.age {
            registration = registration.with_age(age);
        }
        if let Some(gender) = &request.gender {
            registration = registration.with_gender(gender.as_str());
        }
        registration
    }
}

/// Login, registration and logout against the API, keeping the client's
/// session store in step
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and persist it as the current session.
    ///
    /// Nothing is stored unless the response carries an access token.
    pub async fn login(&self, request: &LoginRequest) -> Result<Session, AuthServiceError> {
        request.validate()?;

        let credentials = Credentials {
            email: request.email.clone(),
            password: request.password.clone(),
        };

        let token = match self.client.request_token(&credentials).await {
            Ok(token) => token,
            Err(e) => {
                log_failed_login(&request.email, &e.to_string());
                return Err(e.into());
            }
        };

        let session = Session::from(token);
        if !session.has_access_token() {
            log_failed_login(&request.email, "response had no access token");
            return Err(AuthServiceError::MissingToken);
        }

        self.client.session().save_session(&session)?;
        log_successful_login(&request.email, self.client.base_url().as_str());

        Ok(session)
    }

    /// Create an account. The user still has to log in afterwards.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<UserProfile, AuthServiceError> {
        request.validate()?;

        match self.client.register(&Registration::from(request)).await {
            Ok(user) => {
                log_registration(&request.email, true, None);
                Ok(user)
            }
            Err(e) => {
                log_registration(&request.email, false, Some(&e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Drop the stored session. Logging out while logged out succeeds.
    pub fn logout(&self) -> Result<(), AuthServiceError> {
        let previous = self.client.session().current_session();
        self.client.session().clear()?;

        let user = previous.as_ref().and_then(|s| s.user.as_ref()).map(|u| u.email.as_str());
        log_logout(user);
        debug!("Session cleared");

        Ok(())
    }

    /// The currently stored session, if any
    pub fn current_session(&self) -> Option<Session> {
        self.client.session().current_session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().map(|s| s.has_access_token()).unwrap_or(false)
    }
}
