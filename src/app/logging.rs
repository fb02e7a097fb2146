use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DAYS_TO_KEEP: usize = 7;

/// Stderr plus a daily rolling file in `log_dir`.
///
/// Keep the returned guard alive for the whole run or buffered file
/// output is lost. If the log dir can't be created we log to stderr only.
pub fn init(log_dir: &Path, verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("spotideck")
        .filename_suffix("log")
        .build(log_dir);

    let registry = tracing_subscriber::registry().with(env_filter).with(stderr_layer);

    match file_appender {
        Ok(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .try_init()?;
            Ok(Some(guard))
        }
        Err(e) => {
            registry.try_init()?;
            tracing::warn!(dir = %log_dir.display(), "File logging disabled: {e}");
            Ok(None)
        }
    }
}
