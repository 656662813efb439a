mod watch_config;

pub use watch_config::{WatchConfig, WatchConfigError, interval_from_secs};
