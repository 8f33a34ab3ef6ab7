use crate::session::{KeyValueStorage, SessionStore, LOGIN_ERROR};
use anyhow::{anyhow, Result};
use secrecy::{ExposeSecret, SecretString};
use std::io::Write;
use tracing::debug;

/// Handle the login action, printing the session user on success.
/// # Errors
/// Returns the session error message if the credentials are rejected.
pub async fn handle<S: KeyValueStorage, W: Write>(
    store: &SessionStore<S>,
    out: &mut W,
    username: &str,
    phone: &SecretString,
) -> Result<()> {
    debug!("login attempt for {}", username);

    if !store.login(username, phone.expose_secret()).await {
        let message = store.error().unwrap_or_else(|| LOGIN_ERROR.to_string());
        return Err(anyhow!(message));
    }

    super::write_json(out, &store.user())
}
