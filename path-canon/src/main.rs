use anyhow::Context;
use clap::Parser;
use path_canon::batch::Batch;
use path_canon::config::AppConfig;
use path_canon::report::{OutputFormat, Reporter};
use path_canon::telemetry;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
#[command(name = "path-canon", version, about = "Canonical URL paths for route matching")]
struct Args {
    /// Path to a YAML config file (relative paths inside it are resolved against its directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read paths from this file, one per line, instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Treat inputs as request targets (`/p?q` or `http://host/p?q`)
    #[arg(long)]
    uri: bool,

    /// Only print inputs that are not canonical; exit 1 if there are any
    #[arg(long)]
    check: bool,

    #[arg(short, long = "log")]
    log_level: Option<LevelFilter>,

    /// Paths to clean. Reads lines from --input or stdin when empty.
    paths: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let cfg = match &args.config {
        Some(p) => AppConfig::load(p)?,
        None => AppConfig::default(),
    };

    let log_level = match args.log_level {
        Some(l) => l.to_string(),
        None => cfg.log_level().to_string(),
    };
    telemetry::init_tracing(env!("CARGO_PKG_NAME"), &log_level, cfg.log_dir.as_deref())?;
    let span = tracing::debug_span!(env!("CARGO_PKG_NAME"));
    let _span_guard = span.enter();
    tracing::debug!(?args, ?cfg, "Starting.");

    let format = args.format.unwrap_or_else(|| cfg.format());
    let uri = args.uri || cfg.uri_mode();
    let reporter = Reporter::new(
        BufWriter::new(io::stdout().lock()),
        io::stderr().lock(),
        format,
    );
    let mut batch = Batch::new(reporter, uri, args.check);

    if !args.paths.is_empty() {
        for p in &args.paths {
            batch.process(p.as_bytes())?;
        }
    } else if let Some(input) = args.input.as_ref().or(cfg.input.as_ref()) {
        let f = File::open(input)
            .with_context(|| format!("open input failed: {}", input.display()))?;
        batch.process_lines(BufReader::new(f))?;
    } else {
        batch.process_lines(io::stdin().lock())?;
    }

    let failed = batch.failed();
    let (stats, _, _) = batch.finish()?;
    tracing::info!(
        total = stats.total,
        rewritten = stats.rewritten,
        failed = stats.failed,
        "Done."
    );

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
