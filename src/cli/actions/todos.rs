use crate::session::{KeyValueStorage, SessionStore, Todo};
use anyhow::Result;
use std::io::Write;
use tracing::debug;

fn keep(todo: &Todo, user_id: Option<i64>, pending: bool) -> bool {
    user_id.map_or(true, |id| todo.user_id == id) && !(pending && todo.completed)
}

/// Handle the todos action, filtering the fetched list client-side.
/// # Errors
/// Returns an error if the output cannot be written.
pub async fn handle<S: KeyValueStorage, W: Write>(
    store: &SessionStore<S>,
    out: &mut W,
    user_id: Option<i64>,
    pending: bool,
) -> Result<()> {
    let todos: Vec<Todo> = store
        .fetch_todos()
        .await
        .into_iter()
        .filter(|todo| keep(todo, user_id, pending))
        .collect();

    debug!("{} todos after filtering", todos.len());

    super::write_json(out, &todos)
}
