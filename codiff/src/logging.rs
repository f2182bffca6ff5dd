use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// fallback filter used when `RUST_LOG` env is not set.
const DEFAULT_LOG_LEVEL: &str = "codiff=info,libcodon=info";

/// Initializes tracing to stderr via a non-blocking writer.
///
/// The returned guard must stay alive for the duration of the program, or
/// buffered log lines are lost.
pub fn init_logging() -> Result<WorkerGuard> {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(non_blocking),
        )
        .try_init()?;

    Ok(guard)
}
