//! Shared helpers for the demo binaries.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a `fmt` subscriber honouring `RUST_LOG`; defaults to info for the
/// selector and warn for everything else.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "file_selector=info,file_selector_demos=info,warn".into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
