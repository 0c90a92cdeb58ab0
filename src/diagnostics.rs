//! Shared formatting for fatal error messages and non-fatal warnings.

/// Prefix every fatal error so it stands out in the `anyhow` chain printed by `main`.
pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("error: {}", msg.as_ref())
}

/// Report a non-fatal condition; the run continues.
pub fn warn(msg: impl AsRef<str>) {
    log::warn!("{}", msg.as_ref());
}

/// Install the `env_logger` backend. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
