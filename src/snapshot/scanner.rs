use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::ext::PathDisplayExt;
use crate::snapshot::{FileRecord, FileRecordError, Snapshot};

/// Snapshots the immediate entries of `directory`.
///
/// Subdirectories are recorded as entries but never descended into. Every entry is
/// stat'ed afresh after listing; if any single stat fails the whole scan fails and no
/// partial snapshot is returned.
pub fn scan_directory(directory: &Path) -> Result<Snapshot, ScanError> {
    debug!("Scanning directory {}", directory.absolute_display());
    let entry_names = list_entry_names(directory)?;
    debug!("Listed {} entries", entry_names.len());

    let snapshot = entry_names
        .into_iter()
        .map(|name| -> Result<FileRecord, ScanError> {
            let path = directory.join(name);
            let record = FileRecord::capture(&path).context(StatEntrySnafu {
                directory: directory.to_path_buf(),
            })?;
            debug!(
                "Captured {}: {} bytes, mode {}",
                record.name(),
                record.size(),
                record.mode()
            );
            if record.mode().is_dir() {
                debug!("Not descending into subdirectory {}", path.display());
            }
            Ok(record)
        })
        .collect::<Result<Snapshot, ScanError>>()?;

    info!(
        "Scanned {} entries in {}",
        snapshot.len(),
        directory.absolute_display()
    );
    Ok(snapshot)
}

/// The directory handle is owned by this function and closed when it returns,
/// whether listing succeeded or not.
fn list_entry_names(directory: &Path) -> Result<Vec<OsString>, ScanError> {
    let entries = fs::read_dir(directory).context(OpenDirectorySnafu {
        directory: directory.to_path_buf(),
    })?;

    entries
        .map(|entry| {
            entry.map(|entry| entry.file_name()).context(ListDirectorySnafu {
                directory: directory.to_path_buf(),
            })
        })
        .collect()
}

#[derive(Debug, Snafu)]
pub enum ScanError {
    #[snafu(display("Failed to open directory {}", directory.absolute_display()))]
    OpenDirectoryError {
        directory: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to list entries of directory {}", directory.absolute_display()))]
    ListDirectoryError {
        directory: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to stat an entry of directory {}", directory.absolute_display()))]
    StatEntryError {
        directory: PathBuf,
        source: FileRecordError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp directory")
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).expect("Failed to create file");
        write!(file, "{content}").expect("Failed to write file");
        path
    }

    #[rstest]
    fn empty_directory_yields_empty_snapshot(temp_dir: TempDir) {
        let snapshot = scan_directory(temp_dir.path()).expect("Failed to scan");
        assert!(snapshot.is_empty());
    }

    #[rstest]
    fn files_are_keyed_by_joined_path(temp_dir: TempDir) {
        let a = write_file(temp_dir.path(), "a.txt", "hello");
        let b = write_file(temp_dir.path(), "b.txt", "hello world");

        let snapshot = scan_directory(temp_dir.path()).expect("Failed to scan");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[&a].size(), 5);
        assert_eq!(snapshot[&b].size(), 11);
        assert_eq!(snapshot[&a].name(), "a.txt");
        for (path, record) in snapshot.iter() {
            assert_eq!(path, record.path());
        }
    }

    #[rstest]
    fn subdirectories_are_entries_but_not_descended(temp_dir: TempDir) {
        let subdir = temp_dir.path().join("nested");
        fs::create_dir(&subdir).expect("Failed to create subdirectory");
        let hidden = write_file(&subdir, "inner.txt", "not visible");

        let snapshot = scan_directory(temp_dir.path()).expect("Failed to scan");

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[&subdir].mode().is_dir());
        assert!(!snapshot.contains_key(&hidden));
    }

    #[test]
    fn missing_directory_fails_to_open() {
        let missing = Path::new("/this/directory/does/not/exist");

        let result = scan_directory(missing);

        assert!(matches!(result, Err(ScanError::OpenDirectoryError { .. })));
    }

    #[rstest]
    fn regular_file_is_not_a_scannable_directory(temp_dir: TempDir) {
        let file = write_file(temp_dir.path(), "plain.txt", "x");

        let result = scan_directory(&file);

        assert!(matches!(result, Err(ScanError::OpenDirectoryError { .. })));
    }

    #[cfg(unix)]
    #[rstest]
    fn dangling_symlink_aborts_the_whole_scan(temp_dir: TempDir) {
        write_file(temp_dir.path(), "fine.txt", "ok");
        std::os::unix::fs::symlink(
            temp_dir.path().join("vanished.txt"),
            temp_dir.path().join("dangling"),
        )
        .expect("Failed to create symlink");

        let result = scan_directory(temp_dir.path());

        match result {
            Err(ScanError::StatEntryError {
                source: FileRecordError::StatError { path, .. },
                ..
            }) => assert_eq!(path, temp_dir.path().join("dangling")),
            other => panic!("Expected StatEntryError, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[rstest]
    fn symlinks_are_resolved_to_their_target(temp_dir: TempDir) {
        let target = write_file(temp_dir.path(), "target.txt", "twelve bytes");
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).expect("Failed to create symlink");

        let snapshot = scan_directory(temp_dir.path()).expect("Failed to scan");

        assert_eq!(snapshot[&link].size(), 12);
        assert!(!snapshot[&link].mode().to_string().starts_with('l'));
    }
}
