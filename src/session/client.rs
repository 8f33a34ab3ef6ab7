//! HTTP client for the users/todos API. Requests carry no credentials; the
//! body is read in full and decoded separately so a malformed payload is
//! reported as a deserialization failure rather than a transport one.

use super::error::FetchError;
use super::types::{Todo, User};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info_span, instrument, Instrument};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USERS_PATH: &str = "users";
const TODOS_PATH: &str = "todos";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }

    /// # Errors
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn parse(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self::new(Url::parse(base_url.trim())?))
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or malformed JSON.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn users(&self) -> Result<Vec<User>, FetchError> {
        self.get_json(USERS_PATH).await
    }

    /// # Errors
    /// Returns an error on transport failure, non-2xx status, or malformed JSON.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub async fn todos(&self) -> Result<Vec<Todo>, FetchError> {
        self.get_json(TODOS_PATH).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        endpoint_url(&self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path)?;

        let span = info_span!("api.get", http.method = "GET", url = %url);
        let response = self.client.get(url.clone()).send().instrument(span).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        debug!("{} - {}, {} bytes", url, status, body.len());

        serde_json::from_slice(&body).map_err(|source| FetchError::Deserialization {
            url: url.to_string(),
            source,
        })
    }
}

/// Resolves `path` below `base`, keeping any path prefix the base carries.
fn endpoint_url(base: &Url, path: &str) -> Result<Url, FetchError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }

    Ok(base.join(path.trim().trim_start_matches('/'))?)
}
