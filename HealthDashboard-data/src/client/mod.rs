// API client module structure
mod analysis;
mod auth;
pub mod errors;
mod metrics;
mod query;

use std::fmt;
use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::session::SessionStore;

// Re-export commonly used types
pub use analysis::{
    DEFAULT_BASELINE_DAYS, DEFAULT_ELEVATION_DAYS, DEFAULT_HRV_WINDOW_HOURS, DEFAULT_TIME_OF_DAY_DAYS,
    DEFAULT_WEEKLY_DAYS,
};
pub use auth::{Credentials, Registration};
pub use errors::ApiError;
pub use query::{MetricQuery, Ordering};

/// HTTP client for the health metrics API.
///
/// Every request is built from the configured base URL, and authenticated
/// requests carry the bearer token of whatever session the store holds at
/// the moment the request is built.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client for `config.base_url` reading auth from `session`
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.base_url)?,
            session,
        })
    }

    /// The base URL every resource path is joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session store this client reads its token from
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, path: &str, authenticated: bool) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        if authenticated {
            Ok(builder.headers(self.session.authorization_header()))
        } else {
            Ok(builder)
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Authenticated GET of `path` with `query` appended
    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.request(Method::GET, path, true)?.query(query);
        self.send_json(builder).await
    }

    /// Unauthenticated POST of a JSON body to `path`
    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path, false)?.json(body);
        self.send_json(builder).await
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Parse the base URL, making sure it ends in `/` so joins append to it
fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{}/", raw))?)
    }
}
