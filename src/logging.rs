//! File logging. The terminal belongs to the UI, so nothing goes to stdout.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "mellomaniac.log";

/// Install the global subscriber writing to `<dir>/mellomaniac.log`.
///
/// `RUST_LOG` wins over `default_filter`. Keep the returned guard alive for
/// the lifetime of the program or buffered lines are lost.
pub fn init(dir: &Path, default_filter: &str) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}
