use crate::session::{KeyValueStorage, SessionStore};
use anyhow::Result;
use serde_json::json;
use std::io::Write;

/// Handle the logout action.
/// # Errors
/// Returns an error if the confirmation cannot be written.
pub fn handle<S: KeyValueStorage, W: Write>(store: &SessionStore<S>, out: &mut W) -> Result<()> {
    let was_authenticated = store.is_authenticated();

    store.logout();

    super::write_json(out, &json!({ "logged_out": was_authenticated }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::test_support::{bret, offline_store, output};
    use crate::session::{MemoryStorage, SESSION_KEY};

    #[test]
    fn clears_stored_session() {
        let storage = MemoryStorage::with_entry(SESSION_KEY, &bret().to_string());
        let store = offline_store(storage);
        let mut out = Vec::new();

        handle(&store, &mut out).unwrap();

        assert_eq!(output(out), json!({ "logged_out": true }));
        assert_eq!(store.user(), None);
        assert_eq!(store.storage().get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn logout_without_session() {
        let store = offline_store(MemoryStorage::new());
        let mut out = Vec::new();

        handle(&store, &mut out).unwrap();

        assert_eq!(output(out), json!({ "logged_out": false }));
    }
}
