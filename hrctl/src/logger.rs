//! Logging setup
//!
//! Console output goes to stderr so command output on stdout stays clean.
//! With a log directory, application events and `audit` events are also
//! written to separate daily rotating files.

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "hrctl=info,sheet_client=info,shared=warn,audit=info";

fn filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Initialize logging
///
/// * `level` - filter directive overriding `RUST_LOG`, e.g. `"debug"`
/// * `json_format` - JSON lines instead of human-readable output
/// * `log_dir` - optional directory for `app` and `audit` log files
pub fn init_logger_with_file(
    level: Option<&str>,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let registry = tracing_subscriber::registry()
        .with(filter(level))
        .with(console_layer);

    let Some(dir) = log_dir else {
        registry.try_init()?;
        return Ok(());
    };

    let app_dir = dir.join("app");
    let audit_dir = dir.join("audit");
    fs::create_dir_all(&app_dir)?;
    fs::create_dir_all(&audit_dir)?;

    let app_log = RollingFileAppender::new(Rotation::DAILY, app_dir, "hrctl");
    let app_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(app_log))
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() != "audit"
        }));

    let audit_log = RollingFileAppender::new(Rotation::DAILY, audit_dir, "audit");
    let audit_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(audit_log))
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() == "audit"
        }));

    registry.with(app_layer).with(audit_layer).try_init()?;
    Ok(())
}
