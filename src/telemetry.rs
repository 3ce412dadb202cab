//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,quiz_buzz=debug,tower_http=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Tower HTTP TraceLayer adds per-request spans on top of this.
//!
//! `quiz-buzz serve` logs at info with debug for this crate. `quiz-buzz play`
//! prints the game to stdout, the same stream the fmt layer writes to, so it
//! starts at warn and only storage or network trouble shows up between questions.

use tracing_subscriber::EnvFilter;

/// Filter used by the server when LOG_LEVEL is unset.
pub const SERVER_FILTER: &str = "info,quiz_buzz=debug,tower_http=info,axum=info";
/// The terminal client shares stdout with the game, so keep it quiet.
pub const PLAY_FILTER: &str = "warn";

pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Choose JSON vs pretty; don't try to store different layer types.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
