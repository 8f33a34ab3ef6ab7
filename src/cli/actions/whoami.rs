use crate::session::{KeyValueStorage, SessionStore};
use anyhow::Result;
use serde_json::json;
use std::io::Write;

/// Handle the whoami action; reports the restored session without network calls.
/// # Errors
/// Returns an error if the output cannot be written.
pub fn handle<S: KeyValueStorage, W: Write>(store: &SessionStore<S>, out: &mut W) -> Result<()> {
    let state = store.state();

    super::write_json(
        out,
        &json!({
            "authenticated": state.is_authenticated,
            "user": state.current_user,
        }),
    )
}
