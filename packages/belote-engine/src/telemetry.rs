use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a JSON tracing subscriber for a host process. Honours `RUST_LOG`,
/// defaulting to `info`. Returns false if a global subscriber was already
/// set.
pub fn init_tracing() -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,belote_engine=info"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
