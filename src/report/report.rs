use std::collections::BTreeMap;
use std::io::{self, Stdout, Write};

use colored::Colorize;
use snafu::{ResultExt, Snafu};
use supports_color::Stream;

use crate::diff::DiffResult;
use crate::ext::SystemTimeExt;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Old,
    New,
    Unchanged,
    Changed,
}

impl Section {
    fn title(&self) -> &'static str {
        match self {
            Section::Old => "Old",
            Section::New => "New",
            Section::Unchanged => "Unchanged",
            Section::Changed => "Changed",
        }
    }

    /// Diff sections also carry a structural dump of the raw mapping.
    fn dumps_mapping(&self) -> bool {
        matches!(self, Section::Unchanged | Section::Changed)
    }
}

/// Human-readable rendering of snapshots and their comparison.
pub struct Report<W: Write> {
    out: W,
    color: bool,
}

impl Report<Stdout> {
    pub fn stdout() -> Self {
        let color = supports_color::on(Stream::Stdout).is_some();
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Report<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_diff(&mut self, diff: &DiffResult) -> Result<(), ReportError> {
        self.write_section(Section::Unchanged, &diff.unchanged)?;
        self.write_section(Section::Changed, &diff.changed)
    }

    pub fn write_section(
        &mut self,
        section: Section,
        snapshot: &Snapshot,
    ) -> Result<(), ReportError> {
        self.render_section(section, snapshot)
            .context(WriteSnafu { section })
    }

    fn render_section(&mut self, section: Section, snapshot: &Snapshot) -> io::Result<()> {
        let heading = format!("{} ({} total)", section.title(), snapshot.len());
        if self.color {
            writeln!(self.out, "{}", heading.bold())?;
        } else {
            writeln!(self.out, "{heading}")?;
        }

        if section.dumps_mapping() {
            let mapping = snapshot.iter().collect::<BTreeMap<_, _>>();
            writeln!(self.out, "{mapping:?}")?;
        }

        for (path, record) in snapshot.sorted() {
            writeln!(
                self.out,
                "file: {}, modified: {}, size: {}",
                path.display(),
                record.modified_at().to_timestamp_string(),
                record.size()
            )?;
        }

        writeln!(self.out)?;
        self.out.flush()
    }
}

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Failed to write the {:?} section", section))]
    WriteError {
        section: Section,
        source: std::io::Error,
    },
}
