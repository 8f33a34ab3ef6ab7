use crate::session::{ApiClient, ClientConfig, FileStorage, SessionStore};
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const STORAGE_FILE: &str = "session.json";

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: Url,
    pub storage_path: PathBuf,
    pub timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: Url, storage_path: PathBuf) -> Self {
        Self {
            api_url,
            storage_path,
            timeout: Duration::from_secs(crate::session::DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout)
    }

    /// Builds the session store over the storage file, restoring any saved session.
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn session_store(&self) -> Result<SessionStore<FileStorage>> {
        let client = ApiClient::new(&self.client_config())?;
        Ok(SessionStore::new(
            client,
            FileStorage::new(&self.storage_path),
        ))
    }
}

/// Session file under the platform data directory.
/// # Errors
/// Returns an error if no home directory can be determined.
pub fn default_storage_path() -> Result<PathBuf> {
    ProjectDirs::from("dev", "nuxgame", "nuxgame")
        .map(|dirs| dirs.data_dir().join(STORAGE_FILE))
        .ok_or_else(|| anyhow!("unable to determine data directory, use --storage"))
}
