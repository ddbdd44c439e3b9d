use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// JSON event log on stderr, filtered by `RUST_LOG`.
///
/// Stdout stays free for `wordstats snapshot` output.
pub fn init_normal_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .init();
}

/// Install the global subscriber: tokio-console when `TOKIO_CONSOLE` is set,
/// the JSON log otherwise.
pub fn init_logging() {
    match std::env::var_os("TOKIO_CONSOLE") {
        Some(_) => console_subscriber::init(),
        None => init_normal_logging(),
    }
}
