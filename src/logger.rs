pub use tracing::{debug, error, info, instrument, trace, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// filter; with debug logging on, every closed span logs its duration (the
/// per-color `segment`, `label` and `select` stages included).
///
/// Later calls leave the first subscriber in place.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events(&env_filter));

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        debug!("Logger already initialized");
    }
}

fn span_events(env_filter: &EnvFilter) -> FmtSpan {
    let is_debug = env_filter.to_string().contains("debug")
        || std::env::var("RUST_LOG").unwrap_or_default().contains("debug");
    if is_debug {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}
