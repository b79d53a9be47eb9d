//! Shared helpers for the demo binaries.

use std::env;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install a `tracing` subscriber whose level comes from the `LOGLEVEL`
/// environment variable (`trace`, `debug`, `info`, `warn` or `error`).
/// Defaults to `info`.
pub fn setup_logger() {
    let level = env::var("LOGLEVEL")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }
}
