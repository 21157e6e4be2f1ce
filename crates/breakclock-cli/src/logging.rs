//! Logging setup for the CLI.
//!
//! Logs go to stderr so stdout stays free for the clock display and JSON
//! output. `BREAKCLOCK_LOG` (an `EnvFilter` directive such as
//! `breakclock_core=debug`) overrides the configured level.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "BREAKCLOCK_LOG";

pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logging is best effort; a failed init must not stop the clock.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
