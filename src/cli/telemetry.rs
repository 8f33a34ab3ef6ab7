use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

fn env_filter(level: tracing::Level) -> EnvFilter {
    // RUST_LOG=
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Install the global subscriber. Logs go to stderr so stdout stays JSON.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(level: tracing::Level) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false);

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(env_filter(level));

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
