//! Maps validated CLI matches to an action and the global settings it runs with.

use crate::cli::actions::Action;
use crate::cli::commands::{
    api, ARG_PENDING, ARG_PHONE, ARG_USERNAME, ARG_USER_ID, CMD_LOGIN, CMD_LOGOUT, CMD_TODOS,
    CMD_USERS, CMD_WHOAMI,
};
use crate::cli::globals::{default_storage_path, GlobalArgs};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// # Errors
/// Returns an error if the subcommand is unknown or required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_LOGIN, sub_m)) => Ok(Action::Login {
            username: sub_m
                .get_one::<String>(ARG_USERNAME)
                .cloned()
                .context("missing required argument: --username")?,
            phone: sub_m
                .get_one::<String>(ARG_PHONE)
                .cloned()
                .map(SecretString::from)
                .context("missing required argument: --phone")?,
        }),
        Some((CMD_LOGOUT, _)) => Ok(Action::Logout),
        Some((CMD_WHOAMI, _)) => Ok(Action::Whoami),
        Some((CMD_USERS, _)) => Ok(Action::Users),
        Some((CMD_TODOS, sub_m)) => Ok(Action::Todos {
            user_id: sub_m.get_one::<i64>(ARG_USER_ID).copied(),
            pending: sub_m.get_flag(ARG_PENDING),
        }),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}

/// # Errors
/// Returns an error if no storage path is given and no default can be determined.
pub fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<Url>(api::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let storage_path = match matches.get_one::<PathBuf>(api::ARG_STORAGE) {
        Some(path) => path.clone(),
        None => default_storage_path()?,
    };

    let mut globals = GlobalArgs::new(api_url, storage_path);

    if let Some(seconds) = matches.get_one::<u64>(api::ARG_TIMEOUT) {
        globals.set_timeout(Duration::from_secs(*seconds));
    }

    Ok(globals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn login_action() {
        temp_env::with_vars([("NUXGAME_USERNAME", None::<&str>)], || {
            let matches = commands::new().get_matches_from(vec![
                "nuxgame",
                "login",
                "-u",
                "bret",
                "-p",
                "1-770-736-8031",
            ]);

            match handler(&matches).unwrap() {
                Action::Login { username, phone } => {
                    assert_eq!(username, "bret");
                    assert_eq!(phone.expose_secret(), "1-770-736-8031");
                }
                action => panic!("unexpected action: {action:?}"),
            }
        });
    }

    #[test]
    fn login_action_hides_phone() {
        let matches = commands::new().get_matches_from(vec![
            "nuxgame",
            "login",
            "-u",
            "bret",
            "-p",
            "1-770-736-8031",
        ]);

        let action = handler(&matches).unwrap();
        assert!(!format!("{action:?}").contains("1-770-736-8031"));
    }

    #[test]
    fn simple_actions() {
        let cases = [
            ("logout", "Logout"),
            ("whoami", "Whoami"),
            ("users", "Users"),
        ];
        for (command, expected) in cases {
            let matches = commands::new().get_matches_from(vec!["nuxgame", command]);
            let action = handler(&matches).unwrap();
            assert_eq!(format!("{action:?}"), expected);
        }
    }

    #[test]
    fn todos_action() {
        let matches =
            commands::new().get_matches_from(vec!["nuxgame", "todos", "--user-id", "2"]);

        match handler(&matches).unwrap() {
            Action::Todos { user_id, pending } => {
                assert_eq!(user_id, Some(2));
                assert!(!pending);
            }
            action => panic!("unexpected action: {action:?}"),
        }
    }

    #[test]
    fn globals_from_env() {
        temp_env::with_vars(
            [
                ("NUXGAME_API_URL", Some("http://localhost:3000")),
                ("NUXGAME_STORAGE", Some("/tmp/nuxgame.json")),
                ("NUXGAME_TIMEOUT", Some("4")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec!["nuxgame", "whoami"]);
                let globals = globals(&matches).unwrap();

                assert_eq!(globals.api_url.as_str(), "http://localhost:3000/");
                assert_eq!(globals.storage_path, PathBuf::from("/tmp/nuxgame.json"));
                assert_eq!(globals.timeout, Duration::from_secs(4));
            },
        );
    }

    #[test]
    fn globals_default_storage() {
        temp_env::with_vars([("NUXGAME_STORAGE", None::<&str>)], || {
            let matches = commands::new().get_matches_from(vec!["nuxgame", "users"]);
            if let Ok(globals) = globals(&matches) {
                assert!(globals.storage_path.ends_with("session.json"));
            }
        });
    }
}
