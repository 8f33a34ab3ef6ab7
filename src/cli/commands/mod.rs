pub mod api;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_USERS: &str = "users";
pub const CMD_TODOS: &str = "todos";

pub const ARG_USERNAME: &str = "username";
pub const ARG_PHONE: &str = "phone";
pub const ARG_USER_ID: &str = "user-id";
pub const ARG_PENDING: &str = "pending";

fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Log in with a username and phone number")
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long("username")
                .help("Username, matched case-insensitively")
                .env("NUXGAME_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PHONE)
                .short('p')
                .long("phone")
                .help("Phone number, matched exactly")
                .env("NUXGAME_PHONE")
                .hide_env_values(true)
                .required(true),
        )
}

fn todos() -> Command {
    Command::new(CMD_TODOS)
        .about("Fetch the todo list")
        .arg(
            Arg::new(ARG_USER_ID)
                .long("user-id")
                .help("Only show todos owned by this user id")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_PENDING)
                .long("pending")
                .help("Only show todos that are not completed")
                .action(ArgAction::SetTrue),
        )
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("nuxgame")
        .about("Session store for the users/todos API")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(login())
        .subcommand(Command::new(CMD_LOGOUT).about("End the stored session"))
        .subcommand(Command::new(CMD_WHOAMI).about("Show the stored session user"))
        .subcommand(Command::new(CMD_USERS).about("Fetch the user list"))
        .subcommand(todos());

    let command = api::with_args(command);
    logging::with_args(command)
}
