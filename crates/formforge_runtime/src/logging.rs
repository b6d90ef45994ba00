//! Log filter selection and subscriber installation for the CLI.
//!
//! The library crates only emit `tracing` events; installing a subscriber
//! is left to binaries.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to debug (our crates only)
    #[arg(long, global = true, conflicts_with_all = ["log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single log level for our crates (error|warn|info|debug|trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags),
    /// e.g. "`formforge_engine=trace`"
    #[arg(long, global = true, value_name = "DIRECTIVES")]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// The filter spec these flags select, consulting `RUST_LOG` last.
    #[must_use]
    pub fn spec(&self) -> String {
        compute_spec(
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
            env::var("RUST_LOG").ok().as_deref(),
        )
    }
}

/// Crate targets that make up "our" logs.
#[must_use]
pub fn our_crates() -> &'static [&'static str] {
    &[
        "formforge",
        "formforge_foundation",
        "formforge_model",
        "formforge_engine",
        "formforge_builder",
        "formforge_runtime",
    ]
}

/// Builds a directive string setting `level` for all of our crates.
#[must_use]
pub fn level_spec_for(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Picks the filter spec with precedence `log_filter`, then `debug` or
/// `log_level` (crate-scoped), then `rust_log`, then crate-scoped `info`.
#[must_use]
pub fn compute_spec(
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
    rust_log: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(level) = log_level {
        return level_spec_for(level);
    }
    match rust_log {
        Some(spec) if !spec.trim().is_empty() => spec.to_string(),
        _ => level_spec_for("info"),
    }
}

/// Installs a compact stderr subscriber filtered by `spec`. Does nothing if
/// a global subscriber is already set.
pub fn init(spec: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::new(spec))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init()
        .ok();
}
