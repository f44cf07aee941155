//! Logging helpers
//!
//! Thin wrapper around `env_logger` so binaries and tests embedding the
//! client can turn on the configuration diagnostics with one call.

/// Initialize the logging system
///
/// `RUST_LOG` wins when it is set; otherwise `level` is used as the filter.
/// Calling this more than once is harmless.
///
/// # Parameters
///
/// * `level` - Fallback log level (error, warn, info, debug, trace)
pub fn init_logger(level: &str) {
    let env = env_logger::Env::default()
        .filter_or("RUST_LOG", level);

    // A logger may already be installed by the host application
    let _ = env_logger::Builder::from_env(env).try_init();
}
