//! Logging setup

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the tracing subscriber, preferring `RUST_LOG` over the configured level
///
/// Output goes to stderr so the report can be piped from stdout.
pub fn initialize_logging(level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).try_init()?;
    Ok(())
}
