use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::application::data::LogLevel;
use crate::config::interval_from_secs;

/// Snapshot a directory, wait, snapshot it again and report what changed.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Directory whose immediate entries are compared [default: /data]
    pub path: Option<PathBuf>,

    /// Seconds to wait between the two snapshots [default: 3]
    #[clap(long, short, value_parser = parse_interval)]
    pub interval: Option<Duration>,

    /// YAML file providing `path` and `interval`
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

fn parse_interval(value: &str) -> Result<Duration, String> {
    let seconds = value
        .parse::<f64>()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    interval_from_secs(seconds).map_err(|e| format!("'{value}' is not a valid interval: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn no_arguments_leave_everything_to_defaults() {
        let cli = Cli::try_parse_from(["dirsnap"]).expect("Failed to parse");
        assert_eq!(cli.path, None);
        assert_eq!(cli.interval, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn all_options_are_parsed() {
        let cli = Cli::try_parse_from([
            "dirsnap",
            "/srv/drop",
            "--interval",
            "0.5",
            "-c",
            "watch.yaml",
            "-l",
            "debug",
        ])
        .expect("Failed to parse");

        assert_eq!(cli.path, Some(PathBuf::from("/srv/drop")));
        assert_eq!(cli.interval, Some(Duration::from_millis(500)));
        assert_eq!(cli.config, Some(PathBuf::from("watch.yaml")));
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[rstest]
    #[case("-1")]
    #[case("abc")]
    #[case("inf")]
    fn invalid_intervals_are_rejected(#[case] interval: &str) {
        let result = Cli::try_parse_from(["dirsnap", "--interval", interval]);
        assert!(result.is_err());
    }
}
