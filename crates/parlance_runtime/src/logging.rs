//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PARLANCE_LOG";

/// Installs a stderr subscriber.
///
/// The filter comes from `PARLANCE_LOG` when set; otherwise `debug` when
/// `verbose`, else `warn`. If a subscriber is already installed it stays,
/// and the failure is reported on stderr.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    if let Err(e) = result {
        eprintln!("Log system initialization failed: {e}");
    }
}
