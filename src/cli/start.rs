use crate::cli::{actions::Action, commands, dispatch, globals::GlobalArgs, telemetry};
use anyhow::Result;

/// Parse arguments, install logging and return the action to run.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the arguments do not map to an action.
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let verbosity_level = commands::logging::level_for_count(
        matches
            .get_one::<u8>(commands::logging::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    );

    telemetry::init(verbosity_level)?;

    let action = dispatch::handler(&matches)?;
    let globals = dispatch::globals(&matches)?;

    Ok((action, globals))
}
