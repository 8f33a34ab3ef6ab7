//! Session store: the logged-in user, the last user-facing error and the last
//! fetched todos, restored from durable storage on construction. Observable
//! operations never return errors; failures are logged and surface through
//! the `error` field or an empty result. The `try_*` variants return typed
//! errors without touching session state.

pub mod client;
pub mod error;
pub mod storage;
pub mod types;

pub use self::client::{ApiClient, ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use self::error::{FetchError, SessionError, StorageError};
pub use self::storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use self::types::{SessionState, Todo, User};

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, instrument, warn};

/// Storage key holding the JSON-encoded session user.
pub const SESSION_KEY: &str = "user";
pub const FETCH_USERS_ERROR: &str = "Failed to fetch users";
pub const LOGIN_ERROR: &str = "Login error";

pub struct SessionStore<S: KeyValueStorage> {
    client: ApiClient,
    storage: S,
    state: watch::Sender<SessionState>,
    // held across fetch, verify and persist so concurrent logins apply in order
    login_lock: Mutex<()>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Builds the store and restores any persisted session. A corrupt record
    /// is logged and the store starts logged-out.
    pub fn new(client: ApiClient, storage: S) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let store = Self {
            client,
            storage,
            state,
            login_lock: Mutex::new(()),
        };

        match store.restore_session() {
            Ok(Some(user)) => debug!("restored session for user {}", user.id),
            Ok(None) => debug!("no stored session"),
            Err(err) => warn!("ignoring stored session: {err}"),
        }

        store
    }

    /// Reads the persisted user record and makes it the current user.
    /// # Errors
    /// Returns an error if storage cannot be read or the record is not valid JSON.
    pub fn restore_session(&self) -> Result<Option<User>, SessionError> {
        let Some(raw) = self.storage.get(SESSION_KEY)? else {
            return Ok(None);
        };

        let user: User = serde_json::from_str(&raw)?;
        let restored = user.clone();
        self.state.send_modify(|state| state.set_user(Some(restored)));

        Ok(Some(user))
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().current_user.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.state.borrow().todos.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Fetches the user list; on failure sets the error field and returns an empty list.
    #[instrument(skip(self))]
    pub async fn fetch_users(&self) -> Vec<User> {
        match self.client.users().await {
            Ok(users) => users,
            Err(err) => {
                error!("failed to fetch users: {err}");
                self.set_error(Some(FETCH_USERS_ERROR));
                Vec::new()
            }
        }
    }

    /// # Errors
    /// Returns the transport or deserialization failure of the users request.
    pub async fn try_fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.client.users().await
    }

    /// Fetches todos and replaces the stored list. On failure the previous
    /// list is kept and an empty list is returned.
    #[instrument(skip(self))]
    pub async fn fetch_todos(&self) -> Vec<Todo> {
        match self.client.todos().await {
            Ok(todos) => {
                let fetched = todos.clone();
                self.state.send_modify(|state| state.todos = fetched);
                todos
            }
            Err(err) => {
                error!("failed to fetch todos: {err}");
                Vec::new()
            }
        }
    }

    /// # Errors
    /// Returns the transport or deserialization failure of the todos request.
    pub async fn try_fetch_todos(&self) -> Result<Vec<Todo>, FetchError> {
        self.client.todos().await
    }

    /// Verifies the credentials against a fresh user list and starts a session.
    #[instrument(skip(self, phone))]
    pub async fn login(&self, username: &str, phone: &str) -> bool {
        let _guard = self.login_lock.lock().await;

        self.set_error(None);

        let users = self.fetch_users().await;

        let Some(user) = users
            .into_iter()
            .find(|user| user.matches_credentials(username, phone))
        else {
            self.state.send_modify(|state| {
                state.set_user(None);
                state.last_error = Some(LOGIN_ERROR.to_string());
            });
            warn!("login rejected");
            return false;
        };

        if let Err(err) = self.persist(&user) {
            error!("failed to persist session: {err}");
        }

        info!("login succeeded for user {}", user.id);

        self.state.send_modify(|state| {
            state.set_user(Some(user));
            state.last_error = None;
        });

        true
    }

    /// Ends the session and removes the persisted record.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.state.send_modify(|state| state.set_user(None));

        if let Err(err) = self.storage.remove(SESSION_KEY) {
            error!("failed to remove stored session: {err}");
        }
    }

    fn persist(&self, user: &User) -> Result<(), SessionError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set(SESSION_KEY, &raw)?;
        Ok(())
    }

    fn set_error(&self, message: Option<&str>) {
        self.state
            .send_modify(|state| state.last_error = message.map(ToString::to_string));
    }
}
