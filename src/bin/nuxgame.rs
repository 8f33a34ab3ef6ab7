use anyhow::Result;
use nuxgame::cli::{actions, actions::Action, start};

#[tokio::main]
async fn main() -> Result<()> {
    let (action, globals) = start()?;

    let store = globals.session_store()?;
    let mut stdout = std::io::stdout();

    match action {
        Action::Login { username, phone } => {
            actions::login::handle(&store, &mut stdout, &username, &phone).await?;
        }
        Action::Logout => actions::logout::handle(&store, &mut stdout)?,
        Action::Whoami => actions::whoami::handle(&store, &mut stdout)?,
        Action::Users => actions::users::handle(&store, &mut stdout).await?,
        Action::Todos { user_id, pending } => {
            actions::todos::handle(&store, &mut stdout, user_id, pending).await?;
        }
    }

    Ok(())
}
