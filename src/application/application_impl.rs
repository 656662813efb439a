use std::io::Write;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{RuntimeConfig, RuntimeConfigError};
use crate::cli::Cli;
use crate::diff::{DiffResult, diff_snapshots};
use crate::ext::PathDisplayExt;
use crate::report::{Report, ReportError, Section};
use crate::snapshot::{ScanError, scan_directory};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let runtime_config = RuntimeConfig::resolve(&cli).await.context(ConfigSnafu)?;
        debug!("Resolved runtime config: {:?}", runtime_config);

        let mut report = Report::stdout();
        Self::watch(&runtime_config, &mut report).await?;

        Ok(())
    }

    /// Runs exactly one scan, wait, scan, compare cycle, writing every stage to `report`.
    pub async fn watch<W: Write>(
        runtime_config: &RuntimeConfig,
        report: &mut Report<W>,
    ) -> Result<DiffResult, ApplicationError> {
        let directory = runtime_config.path.as_path();
        info!(
            "Taking initial snapshot of {}",
            directory.absolute_display()
        );
        let old = scan_directory(directory).context(InitialScanSnafu)?;
        report
            .write_section(Section::Old, &old)
            .context(ReportSnafu)?;

        debug!(
            "Waiting {:?} before the follow-up snapshot",
            runtime_config.interval
        );
        compio::time::sleep(runtime_config.interval).await;

        info!(
            "Taking follow-up snapshot of {}",
            directory.absolute_display()
        );
        let new = scan_directory(directory).context(FollowUpScanSnafu)?;
        report
            .write_section(Section::New, &new)
            .context(ReportSnafu)?;

        let diff = diff_snapshots(&old, &new);
        if !diff.has_changes() {
            info!("No changes detected in {}", directory.absolute_display());
        }
        report.write_diff(&diff).context(ReportSnafu)?;

        Ok(diff)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: RuntimeConfigError },
    #[snafu(display("Critical failure encountered during the initial scan"))]
    InitialScanError { source: ScanError },
    #[snafu(display("Critical failure encountered during the follow-up scan"))]
    FollowUpScanError { source: ScanError },
    #[snafu(display("Critical failure encountered while printing the report"))]
    ReportError { source: ReportError },
}
