use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, warn};

use crate::ext::PathDisplayExt;

const PATH_KEY: &str = "path";
const INTERVAL_KEY: &str = "interval";

/// Options read from a YAML configuration file. Absent keys stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchConfig {
    pub path: Option<PathBuf>,
    pub interval: Option<Duration>,
}

impl WatchConfig {
    pub async fn from_path(path: &Path) -> Result<Self, WatchConfigError> {
        debug!("Reading config file: {}", path.absolute_display());
        let bytes = compio::fs::read(path).await.context(ReadSnafu {
            file_path: path.absolute_display(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.absolute_display(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_path(value: &Yaml) -> Result<PathBuf, WatchConfigError> {
        value
            .as_str()
            .map(PathBuf::from)
            .ok_or(WatchConfigError::PathNotString)
    }

    fn parse_interval(value: &Yaml) -> Result<Duration, WatchConfigError> {
        let seconds = value
            .as_integer()
            .map(|seconds| seconds as f64)
            .or_else(|| value.as_floating_point())
            .ok_or_else(|| WatchConfigError::InvalidInterval {
                value: format!("{value:?}"),
            })?;
        interval_from_secs(seconds).map_err(|_| WatchConfigError::InvalidInterval {
            value: seconds.to_string(),
        })
    }

    fn from_mapping(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Self, WatchConfigError> {
        let mut config = Self::default();

        for (key, value) in top_level {
            match key.as_str() {
                Some(PATH_KEY) => config.path = Some(Self::parse_path(value)?),
                Some(INTERVAL_KEY) => config.interval = Some(Self::parse_interval(value)?),
                _ => warn!("Ignoring unrecognized config key: {:?}", key),
            }
        }

        Ok(config)
    }
}

impl TryFrom<&str> for WatchConfig {
    type Error = WatchConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents
            .first()
            .ok_or(WatchConfigError::MalformedConfig)?;

        let top_level = document
            .as_mapping()
            .ok_or(WatchConfigError::TopLevelNotMap)?;

        Self::from_mapping(top_level)
    }
}

/// Converts a user-supplied number of seconds into a wait interval.
pub fn interval_from_secs(seconds: f64) -> Result<Duration, std::time::TryFromFloatSecsError> {
    Duration::try_from_secs_f64(seconds)
}

#[derive(Debug, Snafu)]
pub enum WatchConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("'path' should be a string"))]
    PathNotString,
    #[snafu(display(
        "'interval' should be a non-negative number of seconds, got {}",
        value
    ))]
    InvalidInterval { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[compio::test]
    async fn config_returns_error_on_nonexistent_file() {
        let result = WatchConfig::from_path(Path::new("nonexistent.yaml")).await;
        assert!(matches!(result, Err(WatchConfigError::ReadError { .. })));
    }

    #[compio::test]
    async fn config_is_read_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "path: /srv/incoming\ninterval: 5").expect("Failed to write config");

        let config = WatchConfig::from_path(file.path())
            .await
            .expect("Failed to read config");

        assert_eq!(config.path, Some(PathBuf::from("/srv/incoming")));
        assert_eq!(config.interval, Some(Duration::from_secs(5)));
    }

    #[compio::test]
    async fn config_rejects_non_utf8_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(&[0xff, 0xfe, 0xfd])
            .expect("Failed to write config");

        let result = WatchConfig::from_path(file.path()).await;

        assert!(matches!(result, Err(WatchConfigError::EncodingError { .. })));
    }

    #[test]
    fn config_returns_error_on_invalid_yaml() {
        let result: Result<WatchConfig, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(WatchConfigError::ParseError { .. })));
    }

    #[test]
    fn config_returns_error_on_empty_file() {
        let result: Result<WatchConfig, _> = "".try_into();
        assert!(matches!(result, Err(WatchConfigError::MalformedConfig)));
    }

    #[rstest]
    #[case("- item1\n- item2")]
    #[case("just a string")]
    fn config_returns_error_when_top_level_is_not_map(#[case] contents: &str) {
        let result: Result<WatchConfig, _> = contents.try_into();
        assert!(matches!(result, Err(WatchConfigError::TopLevelNotMap)));
    }

    #[rstest]
    #[case("interval: 3", Duration::from_secs(3))]
    #[case("interval: 0", Duration::ZERO)]
    #[case("interval: 0.25", Duration::from_millis(250))]
    fn config_parses_interval_seconds(#[case] contents: &str, #[case] expected: Duration) {
        let config: WatchConfig = contents.try_into().expect("Failed to parse config");
        assert_eq!(config.interval, Some(expected));
        assert_eq!(config.path, None);
    }

    #[rstest]
    #[case("interval: -1")]
    #[case("interval: soon")]
    #[case("interval: [1, 2]")]
    fn config_rejects_invalid_interval(#[case] contents: &str) {
        let result: Result<WatchConfig, _> = contents.try_into();
        assert!(matches!(
            result,
            Err(WatchConfigError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn config_rejects_non_string_path() {
        let result: Result<WatchConfig, _> = "path: [a, b]".try_into();
        assert!(matches!(result, Err(WatchConfigError::PathNotString)));
    }

    #[test]
    fn config_ignores_unknown_keys() {
        let config: WatchConfig = "path: /data\nrecursive: true"
            .try_into()
            .expect("Failed to parse config");
        assert_eq!(config.path, Some(PathBuf::from("/data")));
        assert_eq!(config.interval, None);
    }

    #[test]
    fn config_handles_unicode_paths() {
        let config: WatchConfig = "path: \"/данные/🚀\"".try_into().expect("Failed to parse config");
        assert_eq!(config.path, Some(PathBuf::from("/данные/🚀")));
    }
}
