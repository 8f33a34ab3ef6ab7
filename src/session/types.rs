//! Records served by the users/todos API and the observable session snapshot.
//! Users carry whatever extra fields the API sends (address, company, ...), so a
//! record persisted after login restores exactly as it was fetched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Only `id`, `username` and `phone` are required; a record missing the
/// display fields still restores and matches.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Case-insensitive username match combined with an exact phone match.
    #[must_use]
    pub fn matches_credentials(&self, username: &str, phone: &str) -> bool {
        self.username.to_lowercase() == username.to_lowercase() && self.phone == phone
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Snapshot of the session as seen by subscribers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub last_error: Option<String>,
    pub todos: Vec<Todo>,
    pub is_authenticated: bool,
}

impl SessionState {
    pub(crate) fn set_user(&mut self, user: Option<User>) {
        self.is_authenticated = user.is_some();
        self.current_user = user;
    }
}
