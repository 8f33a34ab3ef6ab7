use crate::session::DEFAULT_API_URL;
use clap::{builder::ValueParser, Arg, Command};
use std::path::PathBuf;
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STORAGE: &str = "storage";
pub const ARG_TIMEOUT: &str = "timeout";

/// Accepts absolute http(s) URLs only.
#[must_use]
pub fn validator_api_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<Url, String> {
        let url = Url::parse(value.trim()).map_err(|err| format!("invalid url: {err}"))?;

        let scheme = url.scheme().to_string();

        match scheme.as_str() {
            "http" | "https" if url.host().is_some() => Ok(url),
            "http" | "https" => Err("url has no host".to_string()),
            _ => Err(format!("unsupported scheme {scheme}")),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the users/todos API")
                .env("NUXGAME_API_URL")
                .default_value(DEFAULT_API_URL)
                .global(true)
                .value_parser(validator_api_url()),
        )
        .arg(
            Arg::new(ARG_STORAGE)
                .long("storage")
                .help("Session storage file (default: session.json in the user data directory)")
                .env("NUXGAME_STORAGE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("HTTP request timeout in seconds")
                .env("NUXGAME_TIMEOUT")
                .default_value("10")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
