use crate::session::{KeyValueStorage, SessionStore};
use anyhow::{anyhow, Result};
use std::io::Write;

/// Handle the users action.
/// # Errors
/// Returns the session error message if the request failed.
pub async fn handle<S: KeyValueStorage, W: Write>(store: &SessionStore<S>, out: &mut W) -> Result<()> {
    let users = store.fetch_users().await;

    if users.is_empty() {
        if let Some(message) = store.error() {
            return Err(anyhow!(message));
        }
    }

    super::write_json(out, &users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::test_support::{
        bret, can_bind_localhost, mock_api, offline_store, output, store,
    };
    use crate::session::{MemoryStorage, FETCH_USERS_ERROR};
    use serde_json::json;

    #[tokio::test]
    async fn prints_users() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_api().await;
        let store = store(&server.uri(), MemoryStorage::new());
        let mut out = Vec::new();

        handle(&store, &mut out).await.unwrap();

        assert_eq!(output(out), json!([bret()]));
    }

    #[tokio::test]
    async fn offline_is_an_error() {
        let store = offline_store(MemoryStorage::new());
        let mut out = Vec::new();

        let err = handle(&store, &mut out).await.unwrap_err();

        assert_eq!(err.to_string(), FETCH_USERS_ERROR);
        assert!(out.is_empty());
    }
}
