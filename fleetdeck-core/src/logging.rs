//! Logging setup
//!
//! Built on the standard `log` crate with an `env_logger` backend. Configure
//! once at startup, then use `log::info!` and friends anywhere. `RUST_LOG`
//! still wins over the configured level so an operator can turn on debug
//! output without touching config files.

use std::sync::Once;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Initialize the logger. Safe to call multiple times; only the first call
/// has any effect.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(config.level_filter());
        if let Ok(spec) = std::env::var("RUST_LOG") {
            builder.parse_filters(&spec);
        }
        // A second logger may already be installed in tests; ignore that.
        let _ = builder.try_init();
    });
}
