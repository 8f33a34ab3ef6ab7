use clap::{builder::ValueParser, Arg, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

/// Indexed by verbosity count; counts past the end saturate at the last level.
pub const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

#[must_use]
pub fn level_for_count(count: u8) -> Level {
    LEVELS
        .get(usize::from(count))
        .copied()
        .unwrap_or(Level::TRACE)
}

/// Accepts a count (`0`..=`4`) or a level name, as the count.
#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<u8, String> {
        let value = value.trim();
        let index = match value.parse::<usize>() {
            Ok(count) => Some(count).filter(|count| *count < LEVELS.len()),
            Err(_) => LEVELS
                .iter()
                .position(|level| level.as_str().eq_ignore_ascii_case(value)),
        };

        index
            .and_then(|index| u8::try_from(index).ok())
            .ok_or_else(|| format!("invalid log level: {value}"))
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("NUXGAME_LOG_LEVEL")
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
