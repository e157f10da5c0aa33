//! `env_logger` bootstrap.

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs `env_logger` with [`DEFAULT_FILTER`]. Calling it again is a no-op.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Installs `env_logger`, falling back to `default_filter` when `RUST_LOG`
/// is unset. Returns `false` if a logger was already installed.
pub fn init_with_filter(default_filter: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}
