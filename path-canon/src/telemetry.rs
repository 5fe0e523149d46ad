use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Initialize tracing.
///
/// - stderr: human logs (stdout carries results).
/// - file: JSONL logs under `log_dir`, hourly rolling, only when `log_dir` is set.
/// - env: RUST_LOG wins over `default_filter` (e.g. `info,path_canon=trace`).
///
/// Guard must live for process lifetime, otherwise logs may be dropped.
pub fn init_tracing(service: &str, default_filter: &str, log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("bad log filter: {default_filter}"))?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let json_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create log_dir failed: {}", dir.display()))?;

            // Active file is <log_dir>/<service>.jsonl
            let file_appender = tracing_appender::rolling::hourly(dir, format!("{service}.jsonl"));
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
            let _ = TRACING_GUARD.set(guard);

            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_writer(file_writer),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(json_layer)
        .try_init()
        .context("tracing already initialized")?;

    Ok(())
}
