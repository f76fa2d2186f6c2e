//! Analytics Bridge — replays recorded attribution-tracker calls through the
//! tracker wrapper and prints the resulting Google Analytics for Firebase
//! calls, one JSON object per line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use bridge_analytics::{GoogleAnalyticsAdapter, RecordingBackend, SdkAdapter};
use bridge_core::config::AppConfig;
use bridge_mobile_sdk::{AppsFlyerAdapter, InMemoryTracker, TrackerCall, TrackerWrapper};
use clap::Parser;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "analytics-bridge")]
#[command(about = "Replay attribution-tracker calls into Google Analytics for Firebase calls")]
#[command(version)]
struct Cli {
    /// TOML config file (optional; environment variables still apply)
    #[arg(long, short, env = "ANALYTICS_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// NDJSON file of tracker calls, or `-` for stdin
    #[arg(long, short, default_value = "-")]
    input: String,

    /// Pretty-print each emitted call
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Skip the startup calls derived from the config
    #[arg(long, default_value_t = false)]
    no_configure: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the translated calls.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "analytics_bridge=info,bridge_analytics=info".into()),
        )
        .with_writer(io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load(Some(path))
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load(None).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }),
    };

    let adapter: Arc<dyn SdkAdapter> = match config.adapter.clone() {
        Some(custom) => {
            info!(wrapper = %custom.wrapper_parameter_value, "Using adapter from config");
            Arc::new(custom)
        }
        None => Arc::new(AppsFlyerAdapter::new()),
    };

    let backend = Arc::new(RecordingBackend::new());
    let analytics = Arc::new(
        GoogleAnalyticsAdapter::new(adapter, backend.clone())
            .context("invalid SDK adapter configuration")?,
    );
    let wrapper = TrackerWrapper::new(Arc::new(InMemoryTracker::new()), analytics);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.no_configure {
        wrapper.configure(&config.tracker, &config.analytics);
        emit(&mut out, &backend, cli.pretty)?;
    }

    let reader: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&cli.input)
            .with_context(|| format!("failed to open input {}", cli.input))?;
        Box::new(BufReader::new(file))
    };

    let mut replayed = 0usize;
    let mut skipped = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let line_no = index + 1;
        let result = TrackerCall::parse(&line).and_then(|call| call.apply(&wrapper));
        match result {
            Ok(()) => replayed += 1,
            Err(e) => {
                skipped += 1;
                warn!(line = line_no, error = %format!("{e:#}"), "Skipping tracker call");
            }
        }
        emit(&mut out, &backend, cli.pretty)?;
    }

    info!(replayed, skipped, "Replay finished");
    Ok(())
}

/// Write every call recorded since the last emit.
fn emit(out: &mut impl Write, backend: &RecordingBackend, pretty: bool) -> anyhow::Result<()> {
    for call in backend.drain() {
        let json = if pretty {
            serde_json::to_string_pretty(&call)?
        } else {
            serde_json::to_string(&call)?
        };
        writeln!(out, "{json}")?;
    }
    Ok(())
}
