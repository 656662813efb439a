use std::path::PathBuf;
use std::time::Duration;

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::cli::Cli;
use crate::config::{WatchConfig, WatchConfigError};

pub const DEFAULT_PATH: &str = "/data";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);

/// Fully resolved options for one before/after cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub path: PathBuf,
    pub interval: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl RuntimeConfig {
    /// Layers defaults, the optional config file and CLI arguments, later sources winning.
    pub async fn resolve(cli: &Cli) -> Result<Self, RuntimeConfigError> {
        let file_config = match &cli.config {
            Some(config_path) => WatchConfig::from_path(config_path)
                .await
                .context(ConfigFileSnafu)?,
            None => WatchConfig::default(),
        };
        debug!("Loaded config file options: {:?}", file_config);

        Ok(Self::default()
            .overridden_by(file_config.path, file_config.interval)
            .overridden_by(cli.path.clone(), cli.interval))
    }

    fn overridden_by(self, path: Option<PathBuf>, interval: Option<Duration>) -> Self {
        Self {
            path: path.unwrap_or(self.path),
            interval: interval.unwrap_or(self.interval),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum RuntimeConfigError {
    #[snafu(display("Failed to load the config file"))]
    ConfigFileError { source: WatchConfigError },
}
