use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use snafu::{ResultExt, Snafu};

use crate::ext::PathDisplayExt;
use crate::snapshot::FileMode;

/// Metadata of a single directory entry, captured once and never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: PathBuf,
    name: String,
    size: u64,
    mode: FileMode,
    modified_at: SystemTime,
}

impl FileRecord {
    pub fn new(
        path: impl Into<PathBuf>,
        size: u64,
        mode: FileMode,
        modified_at: SystemTime,
    ) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            name,
            size,
            mode,
            modified_at,
        }
    }

    /// Stats `path`, following symlinks, and records what it points to right now.
    pub fn capture(path: &Path) -> Result<Self, FileRecordError> {
        let metadata = std::fs::metadata(path).context(StatSnafu {
            path: path.to_path_buf(),
        })?;
        let modified_at = metadata.modified().context(ModifiedTimeSnafu {
            path: path.to_path_buf(),
        })?;

        Ok(Self::new(
            path,
            metadata.len(),
            FileMode::from_metadata(&metadata),
            modified_at,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn modified_at(&self) -> SystemTime {
        self.modified_at
    }

    /// True when both records describe the same file state.
    ///
    /// The path is deliberately left out: records are compared under the same key.
    pub fn same_state_as(&self, other: &FileRecord) -> bool {
        self.name == other.name
            && self.size == other.size
            && self.mode == other.mode
            && self.modified_at == other.modified_at
    }
}

#[derive(Debug, Snafu)]
pub enum FileRecordError {
    #[snafu(display("Failed to read metadata of {}", path.absolute_display()))]
    StatError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Modification time of {} is not available", path.absolute_display()))]
    ModifiedTimeError {
        path: PathBuf,
        source: std::io::Error,
    },
}
